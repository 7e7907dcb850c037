use crate::error::Result;
use crate::fonts::{FontFace, TextMeasure};

/// Greedy word wrap of `text` to `max_width` points.
///
/// Words are separated by single spaces and never split; a word wider than
/// `max_width` gets a line of its own. Newlines force a break. Empty text
/// produces a single empty line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    face: FontFace,
    font_size: f32,
    max_width: f32,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let mut words = segment.split(' ');
        let mut current = words.next().unwrap_or_default().to_string();

        for word in words {
            let candidate = format!("{} {}", current, word);
            if measure.measure_text(&candidate, face, font_size)? <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        lines.push(current);
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{StandardFonts, TextStyle};

    fn wrap(text: &str, max_width: f32) -> Vec<String> {
        let face = FontFace::monospace();
        // Courier at 10pt: every character is 6pt wide.
        wrap_text(&StandardFonts::new(), text, face, 10.0, max_width).expect("ascii wraps")
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("hello world", 600.0), vec!["hello world"]);
    }

    #[test]
    fn breaks_before_the_word_that_overflows() {
        // "aaa bbb" is 42pt, "aaa bbb ccc" is 66pt.
        assert_eq!(wrap("aaa bbb ccc", 60.0), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn fits_exactly_at_the_limit() {
        assert_eq!(wrap("aaa bbb", 42.0), vec!["aaa bbb"]);
    }

    #[test]
    fn overlong_word_is_kept_whole_on_its_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic b", 30.0),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn surrounding_spaces_are_preserved_when_nothing_breaks() {
        assert_eq!(wrap(" and ", 600.0), vec![" and "]);
    }

    #[test]
    fn newline_forces_a_break() {
        assert_eq!(wrap("one\ntwo", 600.0), vec!["one", "two"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 100.0), vec![String::new()]);
    }

    #[test]
    fn bold_text_wraps_against_bold_metrics() {
        let fonts = StandardFonts::new();
        let regular = FontFace::proportional(TextStyle::Normal);
        let bold = FontFace::proportional(TextStyle::Bold);
        let width = fonts.measure_text("mmmm mmmm", regular, 12.0).unwrap();

        let lines = wrap_text(&fonts, "mmmm mmmm", regular, 12.0, width).unwrap();
        assert_eq!(lines.len(), 1);
        let lines = wrap_text(&fonts, "mmmm mmmm", bold, 12.0, width).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn measurement_failures_propagate() {
        let face = FontFace::proportional(TextStyle::Normal);
        assert!(wrap_text(&StandardFonts::new(), "a \u{1F600}", face, 12.0, 100.0).is_err());
    }
}
