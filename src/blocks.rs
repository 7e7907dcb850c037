//! Per-token layout: turns one block token into placed lines.

use crate::config::{LayoutConfig, Rgb};
use crate::cursor::Cursor;
use crate::document::{Document, DrawCommand};
use crate::error::Result;
use crate::fonts::{FontFace, TextMeasure, TextStyle};
use crate::inline;
use crate::tokens::Token;
use crate::wrap::wrap_text;

const CONTINUATION_PREFIX: &str = "   ";

pub struct BlockRenderer<'a, M: TextMeasure + ?Sized> {
    config: &'a LayoutConfig,
    measure: &'a M,
}

impl<'a, M: TextMeasure + ?Sized> BlockRenderer<'a, M> {
    pub fn new(config: &'a LayoutConfig, measure: &'a M) -> Self {
        Self { config, measure }
    }

    /// Lays out `token` at the cursor. Returns `false` for tokens that produce
    /// no output.
    pub fn render(&self, token: &Token, cursor: &mut Cursor, doc: &mut Document) -> Result<bool> {
        match token {
            Token::Heading { depth, text } => {
                let size = self.config.heading_size(*depth);
                self.styled_text(text, size, self.config.content_width(), cursor, doc)?;
            }
            Token::Paragraph { text } => {
                let size = self.config.font_size_text;
                self.styled_text(text, size, self.config.content_width(), cursor, doc)?;
            }
            Token::Code { text } => self.code(text, cursor, doc)?,
            Token::List { items } => self.list(items, cursor, doc)?,
            Token::Other { kind } => {
                log::warn!("skipping unsupported block: {}", kind);
                return Ok(false);
            }
        }

        cursor.advance(self.config.paragraph_spacing);
        Ok(true)
    }

    /// Heading and paragraph text: every styled run starts on a new line.
    fn styled_text(
        &self,
        text: &str,
        size: f32,
        max_width: f32,
        cursor: &mut Cursor,
        doc: &mut Document,
    ) -> Result<()> {
        for run in inline::scan(text) {
            let face = FontFace::proportional(run.style);
            for line in wrap_text(self.measure, run.text, face, size, max_width)? {
                if !line.is_empty() {
                    self.place(line, face, size, self.config.text_color, cursor, doc)?;
                }
            }
        }
        Ok(())
    }

    /// Physical lines keep their breaks; blank lines keep their height.
    fn code(&self, text: &str, cursor: &mut Cursor, doc: &mut Document) -> Result<()> {
        let face = FontFace::monospace();
        let size = self.config.font_size_code;
        let max_width = self.config.content_width();

        for physical in text.split('\n') {
            for line in wrap_text(self.measure, physical, face, size, max_width)? {
                if line.is_empty() {
                    cursor.place_line(self.config.line_height_for(size));
                } else {
                    self.place(line, face, size, self.config.code_color, cursor, doc)?;
                }
            }
        }
        Ok(())
    }

    fn list(&self, items: &[String], cursor: &mut Cursor, doc: &mut Document) -> Result<()> {
        let size = self.config.font_size_text;
        let max_width = self.config.content_width() - self.config.list_indent;
        let bullet = format!("{}  ", self.config.bullet);

        for item in items {
            let mut first = true;
            for run in inline::scan(item) {
                let face = FontFace::proportional(run.style);
                for line in wrap_text(self.measure, run.text, face, size, max_width)? {
                    if line.is_empty() {
                        continue;
                    }
                    let prefix = if first { bullet.as_str() } else { CONTINUATION_PREFIX };
                    first = false;
                    let text = format!("{}{}", prefix, line);
                    self.place(text, face, size, self.config.text_color, cursor, doc)?;
                }
            }

            if first {
                // Empty item: still show its bullet.
                let face = FontFace::proportional(TextStyle::Normal);
                self.place(bullet.trim_end().to_string(), face, size, self.config.text_color, cursor, doc)?;
            }
            cursor.advance(self.config.line_height_for(size) / 2.0);
        }
        Ok(())
    }

    fn place(
        &self,
        text: String,
        face: FontFace,
        size: f32,
        color: Rgb,
        cursor: &mut Cursor,
        doc: &mut Document,
    ) -> Result<()> {
        let width = self.measure.measure_text(&text, face, size)?;
        let y = cursor.place_line(self.config.line_height_for(size));
        doc.draw(
            cursor.page(),
            DrawCommand {
                text,
                x: self.config.margin,
                y,
                width,
                face,
                size,
                color,
            },
        );
        Ok(())
    }
}
