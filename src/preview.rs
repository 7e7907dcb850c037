//! Live-preview handles.
//!
//! A preview handle is a temporary PDF file that a viewer can load. It is
//! deleted when the handle is revoked or dropped, so a superseded preview
//! never outlives the render that replaced it.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::assembler::Converter;
use crate::error::Result;

/// Shown instead of a preview when there is nothing to render.
pub const EMPTY_PLACEHOLDER: &str = "Start typing markdown to see a preview";

#[derive(Debug)]
pub struct PreviewHandle {
    file: NamedTempFile,
}

impl PreviewHandle {
    pub(crate) fn create(bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("mdpage-preview-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the preview file now instead of on drop.
    pub fn revoke(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState<'a> {
    /// A preview file is ready at this path.
    Ready(&'a Path),
    /// The input was empty; show this text and disable download.
    Placeholder(&'static str),
}

/// Keeps at most one preview handle alive across successive renders.
#[derive(Debug, Default)]
pub struct PreviewSession {
    converter: Converter,
    current: Option<PreviewHandle>,
}

impl PreviewSession {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            current: None,
        }
    }

    /// Re-renders `markdown` from scratch.
    ///
    /// On success the previous handle is released. On failure it is kept, so
    /// the viewer can go on showing the last good preview.
    pub fn update(&mut self, markdown: &str) -> Result<PreviewState<'_>> {
        let document = self.converter.render(markdown)?;
        if document.is_empty() {
            self.current = None;
            return Ok(PreviewState::Placeholder(EMPTY_PLACEHOLDER));
        }

        let handle = document.to_preview_handle()?;
        let handle = self.current.insert(handle);
        Ok(PreviewState::Ready(handle.path()))
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    /// Whether a download is possible, i.e. a successful preview exists.
    pub fn can_download(&self) -> bool {
        self.current.is_some()
    }
}
