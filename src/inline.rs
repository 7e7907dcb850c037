//! Inline emphasis scanning.
//!
//! Emphasis is tracked with two independent toggles rather than matched
//! pairs: `**`/`__` flip bold and `*`/`_` flip italic. A marker without a
//! partner leaves its toggle flipped for the rest of the span.

use crate::fonts::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub style: TextStyle,
}

impl<'a> StyledRun<'a> {
    pub fn new(text: &'a str, style: TextStyle) -> Self {
        Self { text, style }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
}

/// Lazy iterator over the styled runs of a span. A clone continues from the
/// same position; call [`scan`] again to restart.
#[derive(Debug, Clone)]
pub struct StyleScanner<'a> {
    text: &'a str,
    pos: usize,
    run_start: usize,
    bold: bool,
    italic: bool,
}

pub fn scan(text: &str) -> StyleScanner<'_> {
    StyleScanner {
        text,
        pos: 0,
        run_start: 0,
        bold: false,
        italic: false,
    }
}

impl StyleScanner<'_> {
    fn style(&self) -> TextStyle {
        TextStyle::from_flags(self.bold, self.italic)
    }

    fn toggle(&mut self, marker: Marker) {
        match marker {
            Marker::Bold => self.bold = !self.bold,
            Marker::Italic => self.italic = !self.italic,
        }
    }
}

/// Marker starting at byte `pos`, with its length. Doubled markers win.
fn marker_at(bytes: &[u8], pos: usize) -> Option<(Marker, usize)> {
    let ch = *bytes.get(pos)?;
    if ch != b'*' && ch != b'_' {
        return None;
    }
    if bytes.get(pos + 1) == Some(&ch) {
        Some((Marker::Bold, 2))
    } else {
        Some((Marker::Italic, 1))
    }
}

impl<'a> Iterator for StyleScanner<'a> {
    type Item = StyledRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let Some((marker, len)) = marker_at(bytes, self.pos) else {
                self.pos += 1;
                continue;
            };

            let run = &self.text[self.run_start..self.pos];
            let style = self.style();
            self.toggle(marker);
            self.pos += len;
            self.run_start = self.pos;

            if !run.is_empty() {
                return Some(StyledRun::new(run, style));
            }
        }

        if self.run_start < self.text.len() {
            let run = &self.text[self.run_start..];
            self.run_start = self.text.len();
            return Some(StyledRun::new(run, self.style()));
        }
        None
    }
}
