use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::Rgb;
use crate::error::Result;
use crate::fonts::FontFace;
use crate::preview::PreviewHandle;
use crate::{pdf, svg};

/// File name offered when a converted document is downloaded.
pub const DEFAULT_FILENAME: &str = "converted.pdf";

/// One line of text placed on a page.
///
/// `y` is the top of the line, measured downward from the top edge of the
/// page, and `width` is the measured advance of `text` in `face`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

/// A finished render: page geometry plus pages of draw commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_width: f32,
    pub page_height: f32,
    pages: Vec<Page>,
}

impl Document {
    pub(crate) fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
            pages: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// An empty document has no pages and cannot be exported.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All draw commands with the index of the page they sit on.
    pub fn commands(&self) -> impl Iterator<Item = (usize, &DrawCommand)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(idx, page)| page.commands.iter().map(move |cmd| (idx, cmd)))
    }

    pub(crate) fn push_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// Appends a command to page `page`, creating pages up to it as needed.
    pub(crate) fn draw(&mut self, page: usize, command: DrawCommand) {
        while self.pages.len() <= page {
            self.push_page();
        }
        self.pages[page].commands.push(command);
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        pdf::write_document(self)
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Writes the PDF to a temporary file that lives as long as the handle.
    pub fn to_preview_handle(&self) -> Result<PreviewHandle> {
        PreviewHandle::create(&self.to_bytes()?)
    }

    /// The PDF as a `data:` URI for embedding in a viewer.
    pub fn to_data_uri(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        Ok(format!("data:application/pdf;base64,{}", STANDARD.encode(bytes)))
    }

    /// Each page as a standalone SVG document.
    pub fn page_svgs(&self) -> Vec<String> {
        self.pages
            .iter()
            .map(|page| svg::render_page(page, self.page_width, self.page_height))
            .collect()
    }
}
