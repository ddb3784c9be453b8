//! Text cursor: positions glyphs left to right and wraps at the panel edge

use crate::ssd1306::color::{Color, DrawMode};
use crate::ssd1306::error::OledError;
use crate::ssd1306::font::GlyphTable;
use crate::ssd1306::framebuffer::Canvas;
use crate::ssd1306::raster::draw_glyph;

const NEWLINE: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';

/// Top left corner of the next glyph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCursor {
    /// Column in pixels
    pub x: i32,
    /// Row in pixels
    pub y: i32,
}

impl TextCursor {
    /// Cursor at `(x, y)`
    pub fn new(x: i32, y: i32) -> Self {
        TextCursor { x, y }
    }

    /// Move to `(x, y)`
    pub fn set(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Draw one character code and advance.
    ///
    /// `\n` moves to the start of the next text line and `\r` is ignored.
    /// Any other code is blitted, then the cursor moves one glyph plus one
    /// pixel of spacing to the right, wrapping when the next glyph would not
    /// fit in `display_width`.
    pub fn write_char<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        font: &GlyphTable,
        display_width: i32,
        code: u8,
        color: Color,
        mode: DrawMode,
    ) -> Result<(), OledError> {
        let width = i32::from(font.width());
        let height = i32::from(font.height());

        match code {
            NEWLINE => {
                self.y = self.y.saturating_add(height);
                self.x = 0;
            }
            CARRIAGE_RETURN => {}
            _ => {
                draw_glyph(canvas, self.x, self.y, code, font, color, mode)?;
                self.x = self.x.saturating_add(width + 1);
                if self.x > display_width.saturating_sub(width) {
                    self.y = self.y.saturating_add(height);
                    self.x = 0;
                }
            }
        }
        Ok(())
    }

    /// Draw every code of `text` in order, stopping at the first error
    pub fn write_str<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        font: &GlyphTable,
        display_width: i32,
        text: impl AsRef<[u8]>,
        color: Color,
        mode: DrawMode,
    ) -> Result<(), OledError> {
        for &code in text.as_ref() {
            self.write_char(canvas, font, display_width, code, color, mode)?;
        }
        Ok(())
    }
}
