//! Markdown to paginated PDF.
//!
//! Headings, paragraphs, code blocks and lists are laid out on fixed A4 pages
//! with inline bold and italic emphasis, greedy word wrapping and automatic
//! page breaks. Other blocks are skipped.
//!
//! ```no_run
//! let document = mdpage::render("# Title\n\nSome **bold** text.")?;
//! document.save_as(mdpage::DEFAULT_FILENAME)?;
//! # Ok::<(), mdpage::Error>(())
//! ```
//!
//! ```text
//! markdown ──► tokens ──► block renderer ──► style scanner ──► line wrapper
//!                                                                  │
//!            PDF / SVG ◄── document ◄── draw commands ◄── cursor ◄─┘
//! ```

pub mod assembler;
pub mod blocks;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod fonts;
pub mod inline;
pub mod pdf;
pub mod preview;
pub mod svg;
pub mod tokens;
pub mod wrap;

pub use assembler::{Converter, render};
pub use config::{LayoutConfig, Rgb};
pub use document::{DEFAULT_FILENAME, Document, DrawCommand, Page};
pub use error::{Error, Result};
pub use fonts::{FontFace, StandardFonts, TextMeasure, TextStyle};
pub use preview::{PreviewHandle, PreviewSession, PreviewState};
pub use tokens::{ParseOptions, Token};
