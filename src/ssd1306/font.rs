//! Packed bitmap font parser
//!
//! File layout:
//!
//! | byte | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | glyph width in pixels                     |
//! | 1    | glyph height in pixels                    |
//! | 2    | first character code                      |
//! | 3    | number of characters                      |
//! | 4, 5 | glyph map width, decoded `b4 * 100 + b5`  |
//!
//! followed by `total * ceil(height / 8)` rows of `width` bytes. A row is one
//! 8 pixel band of one glyph, bit 0 on top. Rows are ordered strip by strip,
//! band by band, glyph column by glyph column, where a strip holds
//! `map_width / width` glyphs side by side.

use std::fs;
use std::path::Path;

use crate::ssd1306::error::OledError;
use crate::ssd1306::FONT_HEADER_SIZE;

/// Parsed glyph rows of one font
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    width: u8,
    height: u8,
    start_char: u8,
    total_char: u8,
    map_width: u16,
    row_len: usize,
    rows: Vec<u8>,
}

impl GlyphTable {
    /// Read and parse a font file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OledError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| OledError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    /// Parse a font from its file contents.
    ///
    /// Single band fonts (height up to 8) get one zero byte appended to every
    /// row; those fonts carry no right margin of their own. All rows of a
    /// table have the same length either way, see [`Self::row_len`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, OledError> {
        if data.len() < FONT_HEADER_SIZE {
            return Err(OledError::TruncatedData {
                expected: FONT_HEADER_SIZE,
                found: data.len(),
            });
        }
        let (header, body) = data.split_at(FONT_HEADER_SIZE);

        let width = header[0];
        let height = header[1];
        let start_char = header[2];
        let total_char = header[3];
        // Not a big endian u16: the asset files store hundreds and remainder
        let map_width = u16::from(header[4]) * 100 + u16::from(header[5]);

        let rows_per_char = usize::from(height).div_ceil(8);
        let row_count = usize::from(total_char) * rows_per_char;
        let stride = usize::from(width);

        let needed = row_count * stride;
        if body.len() < needed {
            return Err(OledError::TruncatedData {
                expected: FONT_HEADER_SIZE + needed,
                found: data.len(),
            });
        }

        let pad = usize::from(rows_per_char == 1);
        let row_len = stride + pad;
        let mut rows = Vec::with_capacity(row_count * row_len);
        for row in 0..row_count {
            rows.extend_from_slice(&body[row * stride..(row + 1) * stride]);
            rows.resize(rows.len() + pad, 0);
        }

        log::debug!(
            "Parsed font {}x{}, chars {}..{}, map width {}",
            width,
            height,
            start_char,
            u16::from(start_char) + u16::from(total_char),
            map_width
        );

        Ok(GlyphTable {
            width,
            height,
            start_char,
            total_char,
            map_width,
            row_len,
            rows,
        })
    }

    /// Glyph width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// First character code with a glyph
    pub fn start_char(&self) -> u8 {
        self.start_char
    }

    /// Number of glyphs
    pub fn total_char(&self) -> u8 {
        self.total_char
    }

    /// Width of one glyph map strip in pixels
    pub fn map_width(&self) -> u16 {
        self.map_width
    }

    /// Glyphs per strip; zero for a font without width
    pub fn chars_per_row(&self) -> usize {
        if self.width == 0 {
            return 0;
        }
        usize::from(self.map_width) / usize::from(self.width)
    }

    /// 8 pixel bands stored per glyph
    pub fn rows_per_char(&self) -> usize {
        usize::from(self.height).div_ceil(8)
    }

    /// Bytes in every row, padding included
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        if self.row_len == 0 {
            return 0;
        }
        self.rows.len() / self.row_len
    }

    /// True when `code` has a glyph in this font
    pub fn contains(&self, code: u8) -> bool {
        let code = u16::from(code);
        let start = u16::from(self.start_char);
        code >= start && code < start + u16::from(self.total_char)
    }

    /// Row by absolute index into the table
    pub fn row(&self, index: usize) -> Result<&[u8], OledError> {
        let len = self.row_count();
        if index >= len {
            return Err(OledError::IndexOutOfRange { index, len });
        }
        Ok(&self.rows[index * self.row_len..(index + 1) * self.row_len])
    }

    /// Row of glyph `column` in `band`, counting bands across all strips
    pub fn row_at(&self, band: usize, column: usize) -> Result<&[u8], OledError> {
        self.row(band * self.chars_per_row() + column)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a font file: header followed by the given rows
    pub(crate) fn font_bytes(
        width: u8,
        height: u8,
        start: u8,
        total: u8,
        map_width: u16,
        rows: &[&[u8]],
    ) -> Vec<u8> {
        let mut data = vec![
            width,
            height,
            start,
            total,
            (map_width / 100) as u8,
            (map_width % 100) as u8,
        ];
        for row in rows {
            data.extend_from_slice(row);
        }
        data
    }

    #[test]
    fn test_single_band_row_is_padded() {
        let data = font_bytes(5, 8, 32, 1, 5, &[&[0x7C, 0x12, 0x11, 0x12, 0x7C]]);
        let font = GlyphTable::from_bytes(&data).unwrap();

        assert_eq!(font.width(), 5);
        assert_eq!(font.height(), 8);
        assert_eq!(font.start_char(), 32);
        assert_eq!(font.total_char(), 1);
        assert_eq!(font.map_width(), 5);
        assert_eq!(font.row_len(), 6);
        assert_eq!(font.row(0).unwrap(), &[0x7C, 0x12, 0x11, 0x12, 0x7C, 0x00]);
    }

    #[test]
    fn test_multi_band_rows_are_not_padded() {
        let data = font_bytes(
            2,
            16,
            48,
            2,
            4,
            &[&[1, 2], &[3, 4], &[5, 6], &[7, 8]],
        );
        let font = GlyphTable::from_bytes(&data).unwrap();

        assert_eq!(font.rows_per_char(), 2);
        assert_eq!(font.row_len(), 2);
        assert_eq!(font.row_count(), 4);
        assert_eq!(font.chars_per_row(), 2);
        // band 1, column 0 follows the two band 0 rows
        assert_eq!(font.row_at(1, 0).unwrap(), &[5, 6]);
        assert_eq!(font.row_at(0, 1).unwrap(), &[3, 4]);
    }

    #[test]
    fn test_map_width_is_decimal_encoded() {
        let mut data = font_bytes(8, 8, 0, 0, 0, &[]);
        data[4] = 1;
        data[5] = 28;
        let font = GlyphTable::from_bytes(&data).unwrap();
        assert_eq!(font.map_width(), 128);
        assert_eq!(font.chars_per_row(), 16);
    }

    #[test]
    fn test_truncated_header() {
        let err = GlyphTable::from_bytes(&[5, 8, 32]).unwrap_err();
        assert!(matches!(
            err,
            OledError::TruncatedData {
                expected: 6,
                found: 3
            }
        ));
    }

    #[test]
    fn test_truncated_rows() {
        let data = font_bytes(5, 8, 32, 2, 10, &[&[1, 2, 3, 4, 5], &[6, 7]]);
        let err = GlyphTable::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            OledError::TruncatedData {
                expected: 16,
                found: 13
            }
        ));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let data = font_bytes(1, 8, 65, 1, 1, &[&[0xFF], &[0xAA, 0xBB]]);
        let font = GlyphTable::from_bytes(&data).unwrap();
        assert_eq!(font.row_count(), 1);
    }

    #[test]
    fn test_row_index_out_of_range() {
        let data = font_bytes(5, 8, 32, 1, 5, &[&[0; 5]]);
        let font = GlyphTable::from_bytes(&data).unwrap();
        assert!(matches!(
            font.row(1),
            Err(OledError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_contains_covers_start_to_start_plus_total() {
        let blank: &[u8] = &[0];
        let data = font_bytes(1, 8, 250, 6, 1, &[blank; 6]);
        let font = GlyphTable::from_bytes(&data).unwrap();
        assert!(!font.contains(249));
        assert!(font.contains(250));
        assert!(font.contains(255));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GlyphTable::load("/nonexistent/0_missing.bin").unwrap_err();
        assert!(matches!(err, OledError::Io { .. }));
    }
}
