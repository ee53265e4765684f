// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text measurement for the PDF base-14 fonts.
//
// Widths come from the Adobe AFM files (units of 1/1000 em) and cover ASCII
// 0x20..=0x7E; index = (char as usize) - 32. Anything outside that range is
// measured with the font's average lowercase advance.

use serde::{Deserialize, Serialize};

/// Measure the rendered width of a string at a given font size.
///
/// This is the only capability the fitter needs from a font backend. Width
/// must be linear in `font_size`.
pub trait TextMeasure {
    fn measure_width(&self, text: &str, font_size: f32) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure_width(text, font_size)
    }
}

/// Built-in fonts with bundled metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Self::Helvetica => &HELVETICA_WIDTHS,
            Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    fn fallback_width(&self) -> u16 {
        556
    }

    /// Width in 1/1000 em units.
    pub fn glyph_units(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths()[code - 32]
        } else {
            self.fallback_width()
        }
    }
}

impl TextMeasure for StandardFont {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_units(c))).sum();
        units as f32 * font_size / 1000.0
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_linear_in_font_size() {
        let font = StandardFont::HelveticaBold;
        let at_one = font.measure_width("HELLO WORLD", 1.0);
        let at_twelve = font.measure_width("HELLO WORLD", 12.0);
        assert!((at_one * 12.0 - at_twelve).abs() < 1e-3);
    }

    #[test]
    fn known_glyph_widths() {
        assert_eq!(StandardFont::Helvetica.glyph_units(' '), 278);
        assert_eq!(StandardFont::Helvetica.glyph_units('W'), 944);
        assert_eq!(StandardFont::HelveticaBold.glyph_units('i'), 278);
        assert_eq!(StandardFont::HelveticaBold.glyph_units('~'), 584);
    }

    #[test]
    fn bold_lowercase_is_never_narrower() {
        for c in 'a'..='z' {
            assert!(
                StandardFont::HelveticaBold.glyph_units(c) >= StandardFont::Helvetica.glyph_units(c),
                "{c:?}"
            );
        }
    }

    #[test]
    fn non_ascii_uses_fallback_width() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.measure_width("é", 1000.0), 556.0);
        assert_eq!(font.measure_width("", 12.0), 0.0);
    }
}
