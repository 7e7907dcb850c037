use crate::blocks::BlockRenderer;
use crate::config::LayoutConfig;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::error::Result;
use crate::fonts::StandardFonts;
use crate::tokens::{ParseOptions, Token, tokenize};

/// Markdown to [`Document`] conversion with a fixed layout.
///
/// Every call to [`render`](Self::render) lays the whole input out again from
/// scratch; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: LayoutConfig,
    options: ParseOptions,
    fonts: StandardFonts,
}

impl Converter {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            options: ParseOptions::default(),
            fonts: StandardFonts::new(),
        })
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Renders markdown text. Blank input gives an empty document.
    pub fn render(&self, markdown: &str) -> Result<Document> {
        if markdown.trim().is_empty() {
            log::debug!("blank input, nothing to lay out");
            return Ok(Document::new(self.config.page_width, self.config.page_height));
        }

        let tokens = tokenize(markdown, &self.options);
        self.render_tokens(&tokens)
    }

    /// Lays out already tokenized blocks, in order, starting on a fresh page.
    pub fn render_tokens(&self, tokens: &[Token]) -> Result<Document> {
        let renderer = BlockRenderer::new(&self.config, &self.fonts);
        let mut cursor = Cursor::new(&self.config);
        let mut document = Document::new(self.config.page_width, self.config.page_height);
        document.push_page();

        let mut skipped = 0;
        for token in tokens {
            log::trace!("laying out {} at page {} y={:.2}", token.kind(), cursor.page() + 1, cursor.y());
            if !renderer.render(token, &mut cursor, &mut document)? {
                skipped += 1;
            }
        }

        log::debug!(
            "rendered {} block(s) ({} skipped) onto {} page(s)",
            tokens.len(),
            skipped,
            document.page_count()
        );
        Ok(document)
    }
}

/// Renders markdown with the default layout.
pub fn render(markdown: &str) -> Result<Document> {
    Converter::default().render(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_has_no_pages() {
        assert!(render("").unwrap().is_empty());
        assert!(render(" \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn only_skipped_blocks_still_give_one_blank_page() {
        let doc = render("> quoted").unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.commands().count(), 0);
    }

    #[test]
    fn tokens_are_laid_out_in_order() {
        let doc = render("# A\n\nB\n\n```\nC\n```").unwrap();
        let texts: Vec<_> = doc.commands().map(|(_, cmd)| cmd.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = LayoutConfig {
            margin: 500.0,
            ..LayoutConfig::default()
        };
        assert!(Converter::new(config).is_err());
    }

    #[test]
    fn unsupported_character_aborts_the_whole_render() {
        assert!(render("fine\n\nnot fine \u{1F600}").is_err());
    }

    #[test]
    fn soft_breaks_fold_when_hard_breaks_are_off() {
        let converter = Converter::default().with_parse_options(ParseOptions {
            hard_line_breaks: false,
            ..ParseOptions::default()
        });
        let doc = converter.render("one\ntwo").unwrap();
        let texts: Vec<_> = doc.commands().map(|(_, cmd)| cmd.text.as_str()).collect();
        assert_eq!(texts, vec!["one two"]);
    }
}
