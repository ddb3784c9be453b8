//! Driver for SSD1306 based monochrome OLED panels
//!
//! Drawing happens in a packed in-memory [`Framebuffer`] that mirrors the
//! controller RAM; [`Oled::display`] copies it to the panel. Text uses bitmap
//! fonts discovered from a directory, see [`ssd1306::catalog`].
#![warn(missing_docs)]

pub mod ssd1306;

pub use crate::ssd1306::catalog::FontCatalog;
pub use crate::ssd1306::color::{ClearMode, Color, DrawMode};
pub use crate::ssd1306::config::DisplayConfig;
pub use crate::ssd1306::cursor::TextCursor;
pub use crate::ssd1306::driver::Oled;
pub use crate::ssd1306::error::OledError;
pub use crate::ssd1306::font::GlyphTable;
pub use crate::ssd1306::framebuffer::{Canvas, Framebuffer};
pub use crate::ssd1306::interface::I2cInterface;
pub use crate::ssd1306::{Cmd, Flag};
