//! Graphics support via embedded-graphics
//!
//! [`Framebuffer`] is a [`DrawTarget`] with [`BinaryColor`] pixels, so the
//! embedded-graphics text styles and primitives draw into the same buffer as
//! the rasterizer. Pixels are always written in [`DrawMode::Overwrite`].

use std::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::Pixel;

use crate::ssd1306::color::{Color, DrawMode};
use crate::ssd1306::framebuffer::Framebuffer;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        Color::from(color.is_on())
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.into(), DrawMode::Overwrite);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_all(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
