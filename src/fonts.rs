//! Font faces and text measurement.
//!
//! Pages are drawn with the PDF standard Type1 fonts (Helvetica and Courier
//! families, WinAnsi encoded), so measurement uses their AFM advance widths
//! rather than whatever fonts happen to be installed. Oblique faces share the
//! widths of their upright counterparts.

use crate::error::{Error, Result};

/// Inline emphasis state of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl TextStyle {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => TextStyle::Normal,
            (true, false) => TextStyle::Bold,
            (false, true) => TextStyle::Italic,
            (true, true) => TextStyle::BoldItalic,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, TextStyle::Bold | TextStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, TextStyle::Italic | TextStyle::BoldItalic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Proportional,
    Monospace,
}

/// A concrete font: family plus style. Every measure and draw call names one
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub family: Family,
    pub style: TextStyle,
}

impl FontFace {
    /// Every face in PDF resource order.
    pub const ALL: [FontFace; 8] = [
        FontFace::new(Family::Proportional, TextStyle::Normal),
        FontFace::new(Family::Proportional, TextStyle::Bold),
        FontFace::new(Family::Proportional, TextStyle::Italic),
        FontFace::new(Family::Proportional, TextStyle::BoldItalic),
        FontFace::new(Family::Monospace, TextStyle::Normal),
        FontFace::new(Family::Monospace, TextStyle::Bold),
        FontFace::new(Family::Monospace, TextStyle::Italic),
        FontFace::new(Family::Monospace, TextStyle::BoldItalic),
    ];

    pub const fn new(family: Family, style: TextStyle) -> Self {
        Self { family, style }
    }

    pub const fn proportional(style: TextStyle) -> Self {
        Self::new(Family::Proportional, style)
    }

    pub const fn monospace() -> Self {
        Self::new(Family::Monospace, TextStyle::Normal)
    }

    /// PostScript name of the standard font backing this face.
    pub fn base_font(self) -> &'static str {
        match (self.family, self.style) {
            (Family::Proportional, TextStyle::Normal) => "Helvetica",
            (Family::Proportional, TextStyle::Bold) => "Helvetica-Bold",
            (Family::Proportional, TextStyle::Italic) => "Helvetica-Oblique",
            (Family::Proportional, TextStyle::BoldItalic) => "Helvetica-BoldOblique",
            (Family::Monospace, TextStyle::Normal) => "Courier",
            (Family::Monospace, TextStyle::Bold) => "Courier-Bold",
            (Family::Monospace, TextStyle::Italic) => "Courier-Oblique",
            (Family::Monospace, TextStyle::BoldItalic) => "Courier-BoldOblique",
        }
    }

    /// Generic family used when a page is previewed as SVG.
    pub fn css_family(self) -> &'static str {
        match self.family {
            Family::Proportional => "Helvetica, Arial, sans-serif",
            Family::Monospace => "Courier, 'Courier New', monospace",
        }
    }

    /// Ascender height as a fraction of the font size.
    pub fn ascent(self) -> f32 {
        match self.family {
            Family::Proportional => 0.718,
            Family::Monospace => 0.629,
        }
    }

    pub(crate) fn index(self) -> usize {
        FontFace::ALL
            .iter()
            .position(|face| *face == self)
            .unwrap_or_default()
    }
}

pub trait TextMeasure {
    /// Advance width of `text` in points when set in `face` at `font_size`.
    fn measure_text(&self, text: &str, face: FontFace, font_size: f32) -> Result<f32>;
}

/// Metrics of the standard Helvetica and Courier fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFonts;

impl StandardFonts {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasure for StandardFonts {
    fn measure_text(&self, text: &str, face: FontFace, font_size: f32) -> Result<f32> {
        let mut units: u32 = 0;
        for ch in text.chars() {
            units += glyph_width(ch, face).ok_or_else(|| Error::unsupported(ch, face.base_font()))?;
        }
        Ok(units as f32 * font_size / 1000.0)
    }
}

/// Encodes `text` as WinAnsi bytes for a PDF string in `face`.
pub fn encode_winansi(text: &str, face: FontFace) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| winansi_byte(ch).ok_or_else(|| Error::unsupported(ch, face.base_font())))
        .collect()
}

/// Windows-1252 code for `ch`, if the standard fonts can show it.
fn winansi_byte(ch: char) -> Option<u8> {
    let byte = match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => return None,
    };
    Some(byte)
}

const COURIER_WIDTH: u32 = 600;

/// Helvetica widths for U+0020..=U+007E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica widths for WinAnsi bytes 0x80..=0xFF. Unassigned codes hold 0.
const HELVETICA_HIGH: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Helvetica-Bold widths for U+0020..=U+007E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Helvetica-Bold widths for WinAnsi bytes 0x80..=0xFF. Unassigned codes hold 0.
const HELVETICA_BOLD_HIGH: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xF0
];

/// Advance of `ch` in 1/1000 em, looked up by its WinAnsi byte.
fn glyph_width(ch: char, face: FontFace) -> Option<u32> {
    let byte = winansi_byte(ch)? as usize;
    if face.family == Family::Monospace {
        return Some(COURIER_WIDTH);
    }

    let (low, high) = if face.style.is_bold() {
        (&HELVETICA_BOLD, &HELVETICA_BOLD_HIGH)
    } else {
        (&HELVETICA, &HELVETICA_HIGH)
    };
    let width = match byte {
        0x20..=0x7E => low[byte - 0x20],
        0x80..=0xFF => high[byte - 0x80],
        _ => return None,
    };
    Some(u32::from(width))
}
