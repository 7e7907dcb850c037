use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// ISO A4 in points.
const A4_WIDTH: f32 = 595.28;
const A4_HEIGHT: f32 = 841.89;

const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 1.2;
const PARAGRAPH_SPACING: f32 = 16.0;
const HEADING_SIZES: [f32; 6] = [24.0, 20.0, 18.0, 16.0, 14.0, 12.0];
const FONT_SIZE_TEXT: f32 = 12.0;
const FONT_SIZE_CODE: f32 = 11.0;
const LIST_INDENT: f32 = 15.0;
const BULLET: &str = "\u{2022}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0` for PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed layout constants for one render pass.
///
/// Built once and passed by reference into every component; nothing in the
/// layout engine reads ambient state. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    #[serde(default = "default_paragraph_spacing")]
    pub paragraph_spacing: f32,

    /// Font sizes for heading depths 1 through 6.
    #[serde(default = "default_heading_sizes")]
    pub heading_sizes: Vec<f32>,
    #[serde(default = "default_font_size_text")]
    pub font_size_text: f32,
    #[serde(default = "default_font_size_code")]
    pub font_size_code: f32,

    #[serde(default = "default_text_color")]
    pub text_color: Rgb,
    #[serde(default = "default_code_color")]
    pub code_color: Rgb,

    #[serde(default = "default_bullet")]
    pub bullet: String,
    /// Width taken off list items when wrapping, leaving room for the bullet.
    #[serde(default = "default_list_indent")]
    pub list_indent: f32,
}

fn default_page_width() -> f32 {
    A4_WIDTH
}
fn default_page_height() -> f32 {
    A4_HEIGHT
}
fn default_margin() -> f32 {
    MARGIN
}
fn default_line_height() -> f32 {
    LINE_HEIGHT
}
fn default_paragraph_spacing() -> f32 {
    PARAGRAPH_SPACING
}
fn default_heading_sizes() -> Vec<f32> {
    HEADING_SIZES.to_vec()
}
fn default_font_size_text() -> f32 {
    FONT_SIZE_TEXT
}
fn default_font_size_code() -> f32 {
    FONT_SIZE_CODE
}
fn default_text_color() -> Rgb {
    Rgb::BLACK
}
fn default_code_color() -> Rgb {
    Rgb::new(80, 80, 80)
}
fn default_bullet() -> String {
    BULLET.to_string()
}
fn default_list_indent() -> f32 {
    LIST_INDENT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: MARGIN,
            line_height: LINE_HEIGHT,
            paragraph_spacing: PARAGRAPH_SPACING,
            heading_sizes: HEADING_SIZES.to_vec(),
            font_size_text: FONT_SIZE_TEXT,
            font_size_code: FONT_SIZE_CODE,
            text_color: default_text_color(),
            code_color: default_code_color(),
            bullet: BULLET.to_string(),
            list_indent: LIST_INDENT,
        }
    }
}

impl LayoutConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: LayoutConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the layout engine cannot make progress with.
    pub fn validate(&self) -> Result<()> {
        let sizes = [self.font_size_text, self.font_size_code, self.line_height];
        if sizes.iter().chain(&self.heading_sizes).any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(Error::Config(
                "font sizes and line height must be positive".to_string(),
            ));
        }
        if !self.margin.is_finite() || self.margin < 0.0 || self.paragraph_spacing < 0.0 {
            return Err(Error::Config(
                "margin and paragraph spacing must not be negative".to_string(),
            ));
        }
        if self.content_width() - self.list_indent <= 0.0 || self.content_bottom() <= self.margin {
            return Err(Error::Config(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        Ok(())
    }

    /// Font size for a heading depth; depths outside the table use the text size.
    pub fn heading_size(&self, depth: u8) -> f32 {
        (depth as usize)
            .checked_sub(1)
            .and_then(|idx| self.heading_sizes.get(idx))
            .copied()
            .unwrap_or(self.font_size_text)
    }

    pub fn line_height_for(&self, font_size: f32) -> f32 {
        font_size * self.line_height
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest offset a line's bottom edge may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin
    }
}
