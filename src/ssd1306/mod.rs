//! SSD1306 OLED Display Driver
//!
//! Used in the [Qwiic Micro OLED](https://www.sparkfun.com/products/14532) (64x48)
//! and the [Qwiic OLED Display](https://www.sparkfun.com/products/17153) (128x32).
//!
//! ### Usage
//! This driver does not hide that you're working with one packed buffer. To
//! display something you:
//!
//! 1. create an [`driver::Oled`] on top of an [`interface::I2cInterface`] and call
//!    [`driver::Oled::begin`]
//! 1. draw onto the buffer with the pixel, shape and text functions, or with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    through [`driver::Oled::framebuffer_mut`]
//! 1. send the buffer to the controller using [`driver::Oled::display`]
//!
//! ### Pixel layout
//! The buffer mirrors the controller RAM: every byte holds 8 vertically stacked
//! pixels, least significant bit on top. The byte for `(x, y)` lives at
//! `x + (y / 8) * width`.
//!
//! ### Fonts
//! Fonts are packed glyph tables named `<index>_<name>.bin`, discovered from a
//! directory by [`catalog::FontCatalog`]. The build script generates a 5x8 and
//! an 8x16 font into [`FONT_DIR`].

pub mod catalog;
pub mod color;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod graphics;
pub mod interface;
pub mod raster;

mod cmd;
mod flag;

pub use cmd::Cmd;
pub use flag::Flag;

/// Display width of the Micro OLED, pixels horizontally
pub const WIDTH: u16 = 64;

/// Display height of the Micro OLED, pixels vertically
pub const HEIGHT: u16 = 48;

/// I2C addresses the panel answers on, default first
pub const ADDRESSES: [u8; 2] = [0x3D, 0x3C];

/// Columns of the controller's display RAM
pub const GDDRAM_WIDTH: usize = 128;

/// 8-pixel pages of the controller's display RAM
pub const GDDRAM_PAGES: u8 = 8;

/// Bytes in a font file header
pub const FONT_HEADER_SIZE: usize = 6;

/// Largest data block sent in one bus transfer
pub const BLOCK_SIZE: usize = 32;

/// Fonts generated by the build script
pub const FONT_DIR: &str = env!("MICROOLED_FONT_DIR");
