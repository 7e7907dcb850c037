//! Error types for mdpage.

use std::io;
use thiserror::Error;

/// Result type alias for mdpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a render pass or an export.
#[derive(Error, Debug)]
pub enum Error {
    /// A character has no glyph in the WinAnsi-encoded standard fonts.
    #[error("Cannot encode {ch:?} (U+{code:04X}) in font {font}")]
    UnsupportedCharacter {
        ch: char,
        code: u32,
        font: &'static str,
    },

    /// The document has no pages, so there is nothing to export.
    #[error("Document is empty: nothing to export")]
    EmptyDocument,

    /// The layout configuration could not be parsed or is unusable.
    #[error("Invalid layout configuration: {0}")]
    Config(String),

    /// A page preview could not be rasterized.
    #[error("Preview rasterization failed: {0}")]
    Raster(String),

    /// I/O error when writing output or preview files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn unsupported(ch: char, font: &'static str) -> Self {
        Error::UnsupportedCharacter {
            ch,
            code: ch as u32,
            font,
        }
    }
}
