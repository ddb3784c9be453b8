//! Packed 1 bit per pixel framebuffer
//!
//! Byte `x + (y / 8) * width` holds column `x` of page `y / 8`, bit `y % 8`
//! is the pixel. This is the layout the SSD1306 RAM uses, so a flush copies
//! the bytes out unchanged.

use crate::ssd1306::color::{Color, DrawMode};
use crate::ssd1306::error::OledError;

/// Pixel sink the rasterizer draws into
pub trait Canvas {
    /// Plot one pixel. Coordinates off the canvas are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color, mode: DrawMode);

    /// Width and height of the drawable area starting at `(0, 0)`, `None`
    /// when unbounded. Shapes skip the parts that fall outside.
    fn bounds(&self) -> Option<(i32, i32)> {
        None
    }
}

/// In-memory copy of the display contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    buffer: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a cleared buffer for a `width` x `height` panel
    pub fn new(width: u16, height: u16) -> Self {
        let pages = usize::from(height).div_ceil(8);
        Framebuffer {
            width,
            height,
            buffer: vec![0u8; usize::from(width) * pages],
        }
    }

    /// Pixels horizontally
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Pixels vertically
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> usize {
        usize::from(self.height).div_ceil(8)
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True for a zero sized panel
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Byte index and bit mask of a pixel, `None` when off the panel
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / 8) * usize::from(self.width), 1 << (y % 8)))
    }

    /// Current color of a pixel, `None` when off the panel
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.locate(x, y)
            .map(|(index, mask)| Color::from(self.buffer[index] & mask != 0))
    }

    /// Write one pixel.
    ///
    /// Off-panel coordinates are dropped without error; shape algorithms
    /// routinely produce them. In [`DrawMode::Toggle`] only [`Color::SET`]
    /// flips the bit, any other color leaves it alone.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color, mode: DrawMode) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };

        match mode {
            DrawMode::Toggle => {
                if color.is_set() {
                    self.buffer[index] ^= mask;
                }
            }
            DrawMode::Overwrite => {
                if color.is_set() {
                    self.buffer[index] |= mask;
                } else {
                    self.buffer[index] &= !mask;
                }
            }
        }
    }

    /// Fill every byte with `value`
    pub fn clear_all(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// Read-only view of the whole buffer
    pub fn snapshot(&self) -> &[u8] {
        &self.buffer
    }

    /// The `width` bytes of one page, `None` past the last page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let width = usize::from(self.width);
        let start = page.checked_mul(width)?;
        self.buffer.get(start..start.checked_add(width)?)
    }

    /// Replace the contents with a prepared bitmap of exactly [`Self::len`] bytes.
    /// A bitmap of any other size is rejected and the buffer is left untouched.
    pub fn load(&mut self, bitmap: &[u8]) -> Result<(), OledError> {
        if bitmap.len() != self.buffer.len() {
            return Err(OledError::SizeMismatch {
                expected: self.buffer.len(),
                found: bitmap.len(),
            });
        }
        self.buffer.copy_from_slice(bitmap);
        Ok(())
    }
}

impl Canvas for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color, mode: DrawMode) {
        Framebuffer::set_pixel(self, x, y, color, mode);
    }

    fn bounds(&self) -> Option<(i32, i32)> {
        Some((i32::from(self.width), i32::from(self.height)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_one_byte_per_column_per_page() {
        assert_eq!(Framebuffer::new(64, 48).len(), 384);
        assert_eq!(Framebuffer::new(128, 32).len(), 512);
        assert_eq!(Framebuffer::new(8, 9).len(), 16);
    }

    #[test]
    fn test_pixel_byte_layout() {
        let mut fb = Framebuffer::new(64, 48);
        fb.set_pixel(3, 10, Color::SET, DrawMode::Overwrite);
        // page 1, column 3, bit 2
        assert_eq!(fb.snapshot()[3 + 64], 0b0000_0100);
        assert_eq!(fb.snapshot().iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn test_out_of_range_is_silent_noop() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear_all(0xA5);
        let before = fb.clone();
        for (x, y) in [(-1, 0), (0, -1), (16, 0), (0, 16), (i32::MIN, i32::MAX), (100, 3)] {
            fb.set_pixel(x, y, Color::SET, DrawMode::Overwrite);
            fb.set_pixel(x, y, Color::CLEAR, DrawMode::Overwrite);
            fb.set_pixel(x, y, Color::SET, DrawMode::Toggle);
            assert_eq!(fb.get_pixel(x, y), None);
        }
        assert_eq!(fb, before);
    }

    #[test]
    fn test_overwrite_round_trip_every_pixel() {
        let mut fb = Framebuffer::new(20, 13);
        for y in 0..13 {
            for x in 0..20 {
                let color = Color::from((x + y) % 3 == 0);
                fb.set_pixel(x, y, color, DrawMode::Overwrite);
                assert_eq!(fb.get_pixel(x, y), Some(color));
            }
        }
        for y in 0..13 {
            for x in 0..20 {
                fb.set_pixel(x, y, Color::CLEAR, DrawMode::Overwrite);
                assert_eq!(fb.get_pixel(x, y), Some(Color::CLEAR));
            }
        }
    }

    #[test]
    fn test_toggle_with_clear_is_noop() {
        for fill in [0x00, 0xFF, 0x5A] {
            let mut fb = Framebuffer::new(8, 16);
            fb.clear_all(fill);
            let before = fb.clone();
            for y in 0..16 {
                for x in 0..8 {
                    fb.set_pixel(x, y, Color::CLEAR, DrawMode::Toggle);
                    fb.set_pixel(x, y, Color(0xFE), DrawMode::Toggle);
                }
            }
            assert_eq!(fb, before);
        }
    }

    #[test]
    fn test_toggle_with_set_flips() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_pixel(2, 2, Color::SET, DrawMode::Toggle);
        assert_eq!(fb.get_pixel(2, 2), Some(Color::SET));
        fb.set_pixel(2, 2, Color::SET, DrawMode::Toggle);
        assert_eq!(fb.get_pixel(2, 2), Some(Color::CLEAR));
    }

    #[test]
    fn test_non_set_color_overwrites_as_clear() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear_all(0xFF);
        fb.set_pixel(1, 1, Color(0xFE), DrawMode::Overwrite);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::CLEAR));
    }

    #[test]
    fn test_clear_all_fills() {
        let mut fb = Framebuffer::new(4, 8);
        fb.clear_all(0x81);
        assert!(fb.snapshot().iter().all(|b| *b == 0x81));
        assert_eq!(fb.get_pixel(0, 0), Some(Color::SET));
        assert_eq!(fb.get_pixel(0, 1), Some(Color::CLEAR));
    }

    #[test]
    fn test_load_size_mismatch_leaves_buffer() {
        let mut fb = Framebuffer::new(64, 48);
        fb.clear_all(0x11);
        let before = fb.clone();
        let err = fb.load(&[0xFF; 383]).unwrap_err();
        assert!(matches!(
            err,
            OledError::SizeMismatch {
                expected: 384,
                found: 383
            }
        ));
        assert_eq!(fb, before);
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut fb = Framebuffer::new(4, 8);
        fb.load(&[1, 2, 3, 4]).unwrap();
        assert_eq!(fb.snapshot(), &[1, 2, 3, 4]);
        assert_eq!(fb.page(0), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn test_page_past_the_end_is_none() {
        let fb = Framebuffer::new(64, 48);
        assert_eq!(fb.pages(), 6);
        assert_eq!(fb.page(5).map(<[u8]>::len), Some(64));
        assert_eq!(fb.page(6), None);
        assert_eq!(fb.page(usize::MAX), None);
    }

    #[test]
    fn test_bounds_match_dimensions() {
        let fb = Framebuffer::new(128, 32);
        assert_eq!(Canvas::bounds(&fb), Some((128, 32)));
    }
}
