//! Block tokens built from pulldown-cmark's event stream.
//!
//! Only top-level blocks become tokens. Heading, paragraph and list item text
//! is taken verbatim from the source, emphasis markers included, because
//! inline styling is decided later by the style scanner.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

const TAB: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Heading { depth: u8, text: String },
    Paragraph { text: String },
    Code { text: String },
    List { items: Vec<String> },
    /// A block the layout engine does not draw, such as a quote or table.
    Other { kind: &'static str },
}

impl Token {
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Heading { .. } => "heading",
            Token::Paragraph { .. } => "paragraph",
            Token::Code { .. } => "code",
            Token::List { .. } => "list",
            Token::Other { kind } => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat single newlines inside a block as line breaks.
    pub hard_line_breaks: bool,
    /// GitHub extensions: tables and strikethrough.
    pub gfm: bool,
    /// `{#id}` heading attributes.
    pub heading_ids: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            hard_line_breaks: true,
            gfm: true,
            heading_ids: false,
        }
    }
}

impl ParseOptions {
    fn cmark_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.heading_ids {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

/// Byte range of source text covered by a block's inline content.
#[derive(Debug, Clone, Copy, Default)]
struct Span(Option<(usize, usize)>);

impl Span {
    fn extend(&mut self, range: &Range<usize>) {
        self.0 = Some(match self.0 {
            Some((start, end)) => (start.min(range.start), end.max(range.end)),
            None => (range.start, range.end),
        });
    }

    fn slice<'a>(&self, source: &'a str) -> &'a str {
        self.0
            .and_then(|(start, end)| source.get(start..end))
            .unwrap_or_default()
    }
}

/// A list item still being read. Nested lists and code blocks split its
/// text into segments so their source is never sliced into the item.
struct OpenItem {
    idx: usize,
    segments: Vec<Span>,
}

impl OpenItem {
    fn new(idx: usize) -> Self {
        Self {
            idx,
            segments: vec![Span::default()],
        }
    }

    fn extend(&mut self, range: &Range<usize>) {
        if let Some(span) = self.segments.last_mut() {
            span.extend(range);
        }
    }

    fn split(&mut self) {
        self.segments.push(Span::default());
    }

    fn text(&self, source: &str, options: &ParseOptions) -> String {
        let separator = if options.hard_line_breaks { "\n" } else { " " };
        self.segments
            .iter()
            .map(|span| normalize_inline(span.slice(source), options.hard_line_breaks))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

enum OpenBlock {
    Heading { depth: u8, span: Span },
    Paragraph { span: Span },
    Code { text: String },
    List { items: Vec<String>, open_items: Vec<OpenItem> },
    Other { kind: &'static str },
}

impl OpenBlock {
    fn start(tag: &Tag) -> Self {
        match tag {
            Tag::Heading { level, .. } => OpenBlock::Heading {
                depth: *level as u8,
                span: Span::default(),
            },
            Tag::Paragraph => OpenBlock::Paragraph {
                span: Span::default(),
            },
            Tag::CodeBlock(_) => OpenBlock::Code {
                text: String::new(),
            },
            Tag::List(_) => OpenBlock::List {
                items: Vec::new(),
                open_items: Vec::new(),
            },
            Tag::BlockQuote(_) => OpenBlock::Other { kind: "block_quote" },
            Tag::Table(_) => OpenBlock::Other { kind: "table" },
            Tag::HtmlBlock => OpenBlock::Other { kind: "html" },
            Tag::FootnoteDefinition(_) => OpenBlock::Other { kind: "footnote" },
            _ => OpenBlock::Other { kind: "other" },
        }
    }

    fn open_inner(&mut self, tag: &Tag, range: &Range<usize>) {
        match self {
            OpenBlock::Heading { span, .. } | OpenBlock::Paragraph { span } => span.extend(range),
            OpenBlock::List { items, open_items } => match tag {
                // Nested lists flatten into the outer one, in source order.
                Tag::Item => {
                    items.push(String::new());
                    open_items.push(OpenItem::new(items.len() - 1));
                }
                Tag::List(_) | Tag::CodeBlock(_) => split_item(open_items),
                _ => extend_item(open_items, range),
            },
            OpenBlock::Code { .. } | OpenBlock::Other { .. } => {}
        }
    }

    fn close_inner(&mut self, tag_end: &TagEnd, range: &Range<usize>, source: &str, options: &ParseOptions) {
        match self {
            OpenBlock::Heading { span, .. } | OpenBlock::Paragraph { span } => span.extend(range),
            OpenBlock::List { items, open_items } => match tag_end {
                TagEnd::Item => {
                    if let Some(item) = open_items.pop() {
                        items[item.idx] = item.text(source, options);
                    }
                }
                TagEnd::List(_) | TagEnd::CodeBlock => split_item(open_items),
                _ => extend_item(open_items, range),
            },
            OpenBlock::Code { .. } | OpenBlock::Other { .. } => {}
        }
    }

    fn inline(&mut self, event: &Event, range: &Range<usize>) {
        match self {
            OpenBlock::Heading { span, .. } | OpenBlock::Paragraph { span } => span.extend(range),
            OpenBlock::Code { text } => {
                if let Event::Text(chunk) = event {
                    text.push_str(chunk);
                }
            }
            OpenBlock::List { open_items, .. } => extend_item(open_items, range),
            OpenBlock::Other { .. } => {}
        }
    }

    fn finish(self, source: &str, options: &ParseOptions) -> Token {
        match self {
            OpenBlock::Heading { depth, span } => Token::Heading {
                depth,
                text: normalize_inline(span.slice(source), options.hard_line_breaks),
            },
            OpenBlock::Paragraph { span } => Token::Paragraph {
                text: normalize_inline(span.slice(source), options.hard_line_breaks),
            },
            OpenBlock::Code { text } => {
                let body = text.strip_suffix('\n').unwrap_or(&text);
                Token::Code {
                    text: body.replace('\t', TAB),
                }
            }
            OpenBlock::List { items, .. } => Token::List { items },
            OpenBlock::Other { kind } => Token::Other { kind },
        }
    }
}

fn extend_item(open_items: &mut [OpenItem], range: &Range<usize>) {
    if let Some(item) = open_items.last_mut() {
        item.extend(range);
    }
}

fn split_item(open_items: &mut [OpenItem]) {
    if let Some(item) = open_items.last_mut() {
        item.split();
    }
}

/// Strips per-line indentation and hard-break markers from raw inline source,
/// joining lines with a newline or a space.
fn normalize_inline(raw: &str, hard_line_breaks: bool) -> String {
    let separator = if hard_line_breaks { "\n" } else { " " };
    raw.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_suffix('\\').unwrap_or(line).trim_end()
        })
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .replace('\t', TAB)
}

/// Splits markdown into top-level block tokens, in document order.
pub fn tokenize(markdown: &str, options: &ParseOptions) -> Vec<Token> {
    let parser = Parser::new_ext(markdown, options.cmark_options());
    let mut tokens = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut depth = 0usize;

    for (event, range) in parser.into_offset_iter() {
        match &event {
            Event::Start(tag) => {
                depth += 1;
                if depth == 1 {
                    open = Some(OpenBlock::start(tag));
                } else if let Some(block) = open.as_mut() {
                    block.open_inner(tag, &range);
                }
            }
            Event::End(tag_end) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(block) = open.take() {
                        tokens.push(block.finish(markdown, options));
                    }
                } else if let Some(block) = open.as_mut() {
                    block.close_inner(tag_end, &range, markdown, options);
                }
            }
            Event::Rule if depth == 0 => tokens.push(Token::Other { kind: "rule" }),
            _ => {
                if let Some(block) = open.as_mut() {
                    block.inline(&event, &range);
                }
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(markdown: &str) -> Vec<Token> {
        tokenize(markdown, &ParseOptions::default())
    }

    #[test]
    fn heading_keeps_depth_and_text() {
        assert_eq!(
            tokens("# Title"),
            vec![Token::Heading {
                depth: 1,
                text: "Title".to_string()
            }]
        );
        assert_eq!(
            tokens("### Third ###"),
            vec![Token::Heading {
                depth: 3,
                text: "Third".to_string()
            }]
        );
    }

    #[test]
    fn paragraph_text_keeps_emphasis_markers() {
        assert_eq!(
            tokens("**bold** and *italic*"),
            vec![Token::Paragraph {
                text: "**bold** and *italic*".to_string()
            }]
        );
    }

    #[test]
    fn soft_breaks_become_newlines_when_hard_breaks_are_on() {
        let text = "first line\n  second line";
        assert_eq!(
            tokens(text),
            vec![Token::Paragraph {
                text: "first line\nsecond line".to_string()
            }]
        );

        let options = ParseOptions {
            hard_line_breaks: false,
            ..ParseOptions::default()
        };
        assert_eq!(
            tokenize(text, &options),
            vec![Token::Paragraph {
                text: "first line second line".to_string()
            }]
        );
    }

    #[test]
    fn fenced_code_drops_only_the_final_newline() {
        assert_eq!(
            tokens("```\nline1\n\nline2\n```"),
            vec![Token::Code {
                text: "line1\n\nline2".to_string()
            }]
        );
    }

    #[test]
    fn code_keeps_emphasis_characters_and_expands_tabs() {
        assert_eq!(
            tokens("```\n\t**not bold**\n```"),
            vec![Token::Code {
                text: "    **not bold**".to_string()
            }]
        );
    }

    #[test]
    fn list_items_are_raw_item_text() {
        assert_eq!(
            tokens("- item one\n- *item* two"),
            vec![Token::List {
                items: vec!["item one".to_string(), "*item* two".to_string()]
            }]
        );
    }

    #[test]
    fn nested_list_items_appear_once() {
        assert_eq!(
            tokens("- a\n  - b\n\n  more\n- c"),
            vec![Token::List {
                items: vec!["a\nmore".to_string(), "b".to_string(), "c".to_string()]
            }]
        );
        assert_eq!(
            tokens("- a\n  - b\n- c"),
            vec![Token::List {
                items: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }]
        );
    }

    #[test]
    fn code_inside_an_item_keeps_its_body_but_not_its_fences() {
        assert_eq!(
            tokens("- a\n\n  ```\n  code\n  ```\n- c"),
            vec![Token::List {
                items: vec!["a\ncode".to_string(), "c".to_string()]
            }]
        );
    }

    #[test]
    fn loose_and_ordered_lists_are_lists_too() {
        assert_eq!(
            tokens("1. first\n\n2. second"),
            vec![Token::List {
                items: vec!["first".to_string(), "second".to_string()]
            }]
        );
    }

    #[test]
    fn unsupported_blocks_become_other() {
        let kinds: Vec<_> = tokens("> quoted\n\n---\n\n| a |\n|---|\n| b |")
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(kinds, vec!["block_quote", "rule", "table"]);
    }

    #[test]
    fn blocks_keep_document_order() {
        let kinds: Vec<_> = tokens("# H\n\npara\n\n- a\n\n```\nx\n```")
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(kinds, vec!["heading", "paragraph", "list", "code"]);
    }
}
