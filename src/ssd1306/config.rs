//! Panel configuration

use std::path::{Path, PathBuf};

use crate::ssd1306::{ADDRESSES, FONT_DIR, HEIGHT, WIDTH};

/// Size, bus address and font location of one panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Pixels horizontally
    pub width: u16,
    /// Pixels vertically
    pub height: u16,
    /// 7-bit I2C address
    pub address: u8,
    /// Directory scanned for `<index>_<name>.bin` fonts
    pub font_dir: PathBuf,
}

impl Default for DisplayConfig {
    /// The 64x48 Micro OLED on its default address with the generated fonts
    fn default() -> Self {
        DisplayConfig {
            width: WIDTH,
            height: HEIGHT,
            address: ADDRESSES[0],
            font_dir: PathBuf::from(FONT_DIR),
        }
    }
}

impl DisplayConfig {
    /// Config for an arbitrary panel size, other fields default
    pub fn new(width: u16, height: u16) -> Self {
        DisplayConfig {
            width,
            height,
            ..Default::default()
        }
    }

    /// The 128x32 Qwiic OLED Display
    pub fn oled_128x32() -> Self {
        DisplayConfig {
            address: ADDRESSES[1],
            ..DisplayConfig::new(128, 32)
        }
    }

    /// Use another I2C address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Load fonts from another directory
    pub fn with_font_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.font_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Framebuffer length in bytes, one byte per column per 8-pixel page
    pub fn buffer_size(&self) -> usize {
        usize::from(self.width) * usize::from(self.height).div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_micro_oled() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (64, 48));
        assert_eq!(config.address, 0x3D);
        assert_eq!(config.buffer_size(), 384);
    }

    #[test]
    fn test_wide_panel() {
        let config = DisplayConfig::oled_128x32();
        assert_eq!(config.address, 0x3C);
        assert_eq!(config.buffer_size(), 512);
    }

    #[test]
    fn test_partial_page_rounds_up() {
        assert_eq!(DisplayConfig::new(10, 9).buffer_size(), 20);
    }

    #[test]
    fn test_builders() {
        let config = DisplayConfig::default()
            .with_address(0x3C)
            .with_font_dir("/tmp/fonts");
        assert_eq!(config.address, 0x3C);
        assert_eq!(config.font_dir, PathBuf::from("/tmp/fonts"));
    }
}
