//! Metrics for the standard Helvetica family.
//!
//! The report uses only the PDF base-14 Helvetica faces, which every viewer
//! provides, so no font program is embedded. Widths come from the Adobe AFM
//! files and are expressed in 1/1000 em.

use fieldreport_types::pt_to_mm;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Baseline offset from the top of a line box, as a multiple of the font size.
pub const ASCENT_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// The PostScript name of the base-14 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }

    /// The name under which the face is registered in page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

// ASCII 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    333, 333, 584, 584, 584, 611, 975, // : - @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    333, 278, 333, 584, 556, 333, // [ - `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a - m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n - z
    389, 280, 389, 584, // { - ~
];

/// Advance width of `c` in 1/1000 em.
pub fn char_width(c: char, face: FontFace) -> u16 {
    let table = match face {
        FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        // The oblique face shares the regular metrics.
        FontFace::Regular | FontFace::Italic => &HELVETICA_WIDTHS,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '\u{2014}' => 1000,
        '\u{2013}' => 556,
        '\u{2022}' => 350,
        '\u{2018}' | '\u{2019}' => {
            if face == FontFace::Bold {
                278
            } else {
                222
            }
        }
        '\u{201C}' | '\u{201D}' => {
            if face == FontFace::Bold {
                500
            } else {
                333
            }
        }
        _ => 556,
    }
}

/// Width of `text` set in `face` at `size` points, in millimetres.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, face) as u32).sum();
    pt_to_mm(units as f32 / 1000.0 * size)
}

/// Distance between consecutive baselines at `size` points, in millimetres.
pub fn line_height(size: f32) -> f32 {
    pt_to_mm(size * LINE_HEIGHT_FACTOR)
}

/// Distance from the top of a line box to its baseline, in millimetres.
pub fn ascent(size: f32) -> f32 {
    pt_to_mm(size * ASCENT_FACTOR)
}
