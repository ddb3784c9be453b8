//! Error type shared by the font pipeline and the driver

use display_interface::DisplayError;
use std::path::PathBuf;
use thiserror::Error;

/// Driver errors
///
/// Drawing outside the panel or drawing a character the font lacks is not an
/// error; those calls are dropped silently. These variants cover broken data
/// and bad configuration.
#[derive(Error, Debug)]
pub enum OledError {
    /// A font file or the font directory could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A font file ended before the data its header declares
    #[error("font data truncated: expected {expected} bytes, found {found}")]
    TruncatedData {
        /// Bytes the header requires
        expected: usize,
        /// Bytes actually available
        found: usize,
    },

    /// Glyph row or font index lookup past the end
    #[error("index {index} out of range [0, {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of valid entries
        len: usize,
    },

    /// Imported bitmap does not match the framebuffer size
    #[error("bitmap is {found} bytes, framebuffer is {expected} bytes")]
    SizeMismatch {
        /// Framebuffer length
        expected: usize,
        /// Bitmap length
        found: usize,
    },

    /// Requested font type is not in the catalog
    #[error("font type {index} not available, {count} fonts loaded")]
    Configuration {
        /// Requested font type
        index: usize,
        /// Fonts in the catalog
        count: usize,
    },

    /// Transport failure reported by the display interface
    #[error("display bus error: {0:?}")]
    Bus(DisplayError),
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Bus(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_format() {
        assert_eq!(
            OledError::TruncatedData {
                expected: 11,
                found: 8
            }
            .to_string(),
            "font data truncated: expected 11 bytes, found 8"
        );
        assert_eq!(
            OledError::SizeMismatch {
                expected: 384,
                found: 10
            }
            .to_string(),
            "bitmap is 10 bytes, framebuffer is 384 bytes"
        );
        assert_eq!(
            OledError::Configuration { index: 3, count: 2 }.to_string(),
            "font type 3 not available, 2 fonts loaded"
        );
    }

    #[test]
    fn test_bus_error_conversion() {
        let e: OledError = DisplayError::BusWriteError.into();
        assert!(matches!(e, OledError::Bus(DisplayError::BusWriteError)));
    }
}
