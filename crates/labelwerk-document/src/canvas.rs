// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing surface for a single label page.

use std::path::Path;

use labelwerk_core::TextAlign;
use labelwerk_core::error::Result;

use crate::metrics::TextMeasure;

/// A one-page drawing surface bound to a single font.
///
/// Coordinates are in points with the origin at the bottom-left corner; `y`
/// is the text baseline. `x` is the left edge, centre or right edge of the
/// line depending on `align`.
pub trait Canvas: TextMeasure {
    fn draw_line(&mut self, x: f32, y: f32, text: &str, font_size: f32, align: TextAlign);

    /// Serialise the finished page.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;

    /// Serialise the finished page to `path`.
    fn save(self, path: &Path) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Left edge of a line of `width` anchored at `x` with `align`.
pub fn line_origin(x: f32, width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width / 2.0,
        TextAlign::Right => x - width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_follows_alignment() {
        assert_eq!(line_origin(100.0, 40.0, TextAlign::Left), 100.0);
        assert_eq!(line_origin(100.0, 40.0, TextAlign::Center), 80.0);
        assert_eq!(line_origin(100.0, 40.0, TextAlign::Right), 60.0);
    }
}
