//! Pixel color and draw mode for the 1 bit framebuffer

/// Pixel color
///
/// The value is the raw byte the drawing code works with. Only
/// [`Color::SET`] lights a pixel; every other value draws as clear,
/// including the complement glyph rendering uses for background pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    /// Pixel off (black on the panel)
    pub const CLEAR: Color = Color(0);
    /// Pixel on (white on the panel)
    pub const SET: Color = Color(1);

    /// True when writing this color lights the pixel
    pub const fn is_set(self) -> bool {
        self.0 == Self::SET.0
    }

    /// Bitwise complement masked to 8 bits
    pub const fn complement(self) -> Color {
        Color(!self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::SET
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::SET
        } else {
            Color::CLEAR
        }
    }
}

/// How a pixel write combines with the current pixel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Replace the pixel with the color
    #[default]
    Overwrite,
    /// XOR the pixel; only [`Color::SET`] has an effect
    Toggle,
}

/// Target of a clear operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearMode {
    /// The in-memory framebuffer
    Page,
    /// The controller's display RAM
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_of_set_is_not_set() {
        assert_eq!(Color::SET.complement(), Color(0xFE));
        assert!(!Color::SET.complement().is_set());
    }

    #[test]
    fn test_complement_of_clear_does_not_light() {
        // 0xFF is not SET, so clear glyph backgrounds stay dark
        assert_eq!(Color::CLEAR.complement(), Color(0xFF));
        assert!(!Color::CLEAR.complement().is_set());
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Color::from(true), Color::SET);
        assert_eq!(Color::from(false), Color::CLEAR);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Color::default(), Color::SET);
        assert_eq!(DrawMode::default(), DrawMode::Overwrite);
    }
}
