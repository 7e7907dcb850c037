//! Property-based checks of the layout engine.

use mdpage::fonts::{FontFace, StandardFonts, TextMeasure, TextStyle};
use mdpage::inline::scan;
use mdpage::wrap::wrap_text;
use mdpage::{LayoutConfig, render};
use proptest::prelude::*;

fn style_strategy() -> impl Strategy<Value = TextStyle> {
    prop_oneof![
        Just(TextStyle::Normal),
        Just(TextStyle::Bold),
        Just(TextStyle::Italic),
        Just(TextStyle::BoldItalic),
    ]
}

fn face_strategy() -> impl Strategy<Value = FontFace> {
    prop_oneof![
        style_strategy().prop_map(FontFace::proportional),
        Just(FontFace::monospace()),
    ]
}

/// ASCII letters plus Latin-1 letters and signs, whose widths differ most
/// from the ASCII ones.
const WORD: &str = "[a-zA-Z\u{C0}-\u{FF}\u{A9}\u{AE}\u{B1}\u{BC}-\u{BF}\u{AC}]{1,12}";

fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(WORD, 1..max).prop_map(|w| w.join(" "))
}

/// A markdown block the layout engine draws.
fn block_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=6, words(8)).prop_map(|(depth, text)| format!("{} {}", "#".repeat(depth as usize), text)),
        words(60),
        (words(4), words(4), words(4)).prop_map(|(a, b, c)| format!("{} **{}** *{}*", a, b, c)),
        prop::collection::vec(words(12), 1..6).prop_map(|lines| format!("```\n{}\n```", lines.join("\n"))),
        prop::collection::vec(words(30), 1..5).prop_map(|items| {
            items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n")
        }),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(block_strategy(), 1..40).prop_map(|blocks| blocks.join("\n\n"))
}

proptest! {
    #[test]
    fn wrapped_lines_fit_unless_a_single_word_overflows(
        text in words(40),
        face in face_strategy(),
        size in 6.0f32..30.0,
        max_width in 10.0f32..500.0,
    ) {
        let fonts = StandardFonts::new();
        let lines = wrap_text(&fonts, &text, face, size, max_width).unwrap();

        for line in &lines {
            let width = fonts.measure_text(line, face, size).unwrap();
            prop_assert!(
                width <= max_width || !line.contains(' '),
                "line {:?} is {} wide, limit {}", line, width, max_width
            );
        }
        // Nothing is lost: only the break spaces disappear.
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn styled_runs_reconstruct_text_without_markers(
        segments in prop::collection::vec(("[a-zA-Z0-9 ,.]{0,16}", style_strategy()), 0..10),
        doubled_with_underscores in any::<bool>(),
    ) {
        let (bold, italic) = if doubled_with_underscores { ("__", "_") } else { ("**", "*") };
        let mut markdown = String::new();
        let mut plain = String::new();
        for (text, style) in &segments {
            let (open, close) = match style {
                TextStyle::Normal => (String::new(), String::new()),
                TextStyle::Bold => (bold.to_string(), bold.to_string()),
                TextStyle::Italic => (italic.to_string(), italic.to_string()),
                TextStyle::BoldItalic => (format!("{}{}", bold, italic), format!("{}{}", italic, bold)),
            };
            markdown.push_str(&format!("{}{}{}", open, text, close));
            plain.push_str(text);
        }

        let rebuilt: String = scan(&markdown).map(|run| run.text).collect();
        prop_assert_eq!(rebuilt, plain);
    }

    #[test]
    fn styled_runs_carry_the_style_of_their_markers(
        segments in prop::collection::vec(("[a-z]{1,8}", style_strategy()), 1..8),
    ) {
        let mut markdown = String::new();
        for (text, style) in &segments {
            let marker = match style {
                TextStyle::Normal => "",
                TextStyle::Bold => "**",
                TextStyle::Italic => "*",
                TextStyle::BoldItalic => "***",
            };
            // Separate segments so adjacent runs never merge.
            markdown.push_str(&format!("{}{}{} ", marker, text, marker));
        }

        let styled: Vec<_> = scan(&markdown)
            .filter(|run| !run.text.trim().is_empty())
            .map(|run| run.style)
            .collect();
        // Neighbouring plain segments read as one run.
        let mut expected: Vec<TextStyle> = Vec::new();
        for (_, style) in &segments {
            if !(*style == TextStyle::Normal && expected.last() == Some(&TextStyle::Normal)) {
                expected.push(*style);
            }
        }
        prop_assert_eq!(styled, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_line_stays_inside_the_margins(markdown in document_strategy()) {
        let config = LayoutConfig::default();
        let doc = render(&markdown).unwrap();

        for (page, cmd) in doc.commands() {
            prop_assert!(cmd.y >= config.margin, "page {} line {:?} at {}", page, cmd.text, cmd.y);
            prop_assert!(cmd.y <= config.page_height - config.margin);
            prop_assert!(cmd.x + cmd.width <= config.page_width - config.margin + 1e-3 || !cmd.text.trim().contains(' '));
        }
    }

    #[test]
    fn cursor_only_moves_down_within_a_page(markdown in document_strategy()) {
        let config = LayoutConfig::default();
        let doc = render(&markdown).unwrap();

        for (idx, page) in doc.pages().iter().enumerate() {
            let ys: Vec<f32> = page.commands.iter().map(|cmd| cmd.y).collect();
            prop_assert!(ys.windows(2).all(|pair| pair[0] <= pair[1]));
            if idx > 0 {
                prop_assert_eq!(ys.first().copied(), Some(config.margin));
            }
        }
    }

    #[test]
    fn rendering_twice_gives_identical_bytes(markdown in document_strategy()) {
        let first = render(&markdown).unwrap().to_bytes().unwrap();
        let second = render(&markdown).unwrap().to_bytes().unwrap();
        prop_assert_eq!(first, second);
    }
}
