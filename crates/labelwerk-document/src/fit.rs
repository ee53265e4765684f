// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Auto-fit text layout. Find the largest font size at which a string fills
// the printable area of a label in at most `max_lines` greedily wrapped lines.
//
// The search is a fixed-length bisection over font size. Every probe re-wraps
// the text from scratch: a greedy wrap computed at one size says nothing about
// any other size, so nothing is reused between iterations.

use labelwerk_core::PageGeometry;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::metrics::TextMeasure;

/// Drawn when the input is empty or whitespace-only.
pub const PLACEHOLDER_TEXT: &str = "LABEL";

/// Bisection rounds never go below this.
pub const MIN_ITERATIONS: u32 = 20;

/// Tuning knobs for [`fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    pub max_lines: usize,
    pub min_font_size: f32,
    /// Line pitch as a multiple of the font size.
    pub line_height_factor: f32,
    pub iterations: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_lines: 3,
            min_font_size: 6.0,
            line_height_factor: 1.1,
            iterations: 22,
        }
    }
}

impl FitOptions {
    /// Replace out-of-range values with usable ones.
    pub(crate) fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            max_lines: self.max_lines.max(1),
            min_font_size: positive(self.min_font_size, defaults.min_font_size),
            line_height_factor: positive(self.line_height_factor, defaults.line_height_factor),
            iterations: self.iterations.max(MIN_ITERATIONS),
        }
    }
}

/// Chosen font size and line breaks for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFitResult {
    pub font_size: f32,
    /// Never empty; at most `max_lines` entries.
    pub lines: Vec<String>,
    /// `false` means the layout is a best effort at the minimum font size and
    /// may overflow the printable area.
    pub fits: bool,
}

impl TextFitResult {
    /// Height of the laid-out block for the given line pitch factor.
    pub fn block_height(&self, line_height_factor: f32) -> f32 {
        self.lines.len() as f32 * self.font_size * line_height_factor
    }
}

/// Outcome of wrapping at a single candidate size.
#[derive(Debug, PartialEq)]
enum Wrap {
    /// Wrapped within the line budget. `overflows` is set when a single word
    /// is wider than the line on its own.
    Lines { lines: Vec<String>, overflows: bool },
    /// Needed more lines than allowed.
    TooManyLines,
}

/// Fit `text` into `geometry`, measuring with `measure`.
///
/// Never fails: when nothing fits, the result carries `fits == false` and the
/// layout at `options.min_font_size`.
pub fn fit<M>(geometry: &PageGeometry, text: &str, measure: &M, options: &FitOptions) -> TextFitResult
where
    M: TextMeasure + ?Sized,
{
    let options = options.sanitized();
    let trimmed = text.trim();
    let text = if trimmed.is_empty() { PLACEHOLDER_TEXT } else { trimmed };
    let words: Vec<&str> = text.split_whitespace().collect();

    let available_width = geometry.available_width();
    let available_height = geometry.available_height();
    let min_size = options.min_font_size;

    // Upper bound: the widest single word must fit the line on its own, and a
    // single line must fit the height.
    let unit_width = words
        .iter()
        .map(|word| measure.measure_width(word, 1.0))
        .fold(0.0_f32, f32::max);
    let hi_by_width = if unit_width > 0.0 {
        available_width / unit_width
    } else {
        f32::INFINITY
    };
    let hi_by_height = available_height / options.line_height_factor;
    let upper = hi_by_width.min(hi_by_height).max(min_size);

    let mut lo = min_size;
    let mut hi = upper;
    let mut best: Option<(f32, Vec<String>)> = None;

    for _ in 0..options.iterations {
        let mid = (lo + hi) / 2.0;
        match wrap_words(&words, measure, mid, available_width, Some(options.max_lines)) {
            Wrap::TooManyLines => {
                trace!(size = mid, "too many lines");
                hi = mid;
            }
            Wrap::Lines { lines, overflows } => {
                let total_height = lines.len() as f32 * mid * options.line_height_factor;
                if !overflows && total_height <= available_height {
                    trace!(size = mid, lines = lines.len(), "fits");
                    best = Some((mid, lines));
                    lo = mid;
                } else {
                    trace!(size = mid, total_height, overflows, "too large");
                    hi = mid;
                }
            }
        }
    }

    let result = match best {
        Some((font_size, lines)) => TextFitResult {
            font_size,
            lines,
            fits: true,
        },
        None => layout_at_minimum(&words, measure, available_width, available_height, &options),
    };

    debug!(
        font_size = result.font_size,
        lines = result.lines.len(),
        fits = result.fits,
        upper,
        "text fitted"
    );
    result
}

/// Layout at the minimum size, used when no probe fitted.
///
/// Bisection probes only approach the lower bound unless the upper bound is
/// clamped to it, so the minimum size is always re-checked here before the
/// overflowing layout is used.
fn layout_at_minimum<M>(
    words: &[&str],
    measure: &M,
    available_width: f32,
    available_height: f32,
    options: &FitOptions,
) -> TextFitResult
where
    M: TextMeasure + ?Sized,
{
    let size = options.min_font_size;
    let (mut lines, overflows) = match wrap_words(words, measure, size, available_width, None) {
        Wrap::Lines { lines, overflows } => (lines, overflows),
        Wrap::TooManyLines => unreachable!("wrapping without a line budget cannot exceed it"),
    };

    let within_budget = lines.len() <= options.max_lines;
    if lines.len() > options.max_lines {
        // Fold the excess onto the last permitted line; it will overflow.
        let tail = lines.split_off(options.max_lines - 1).join(" ");
        lines.push(tail);
    }

    let total_height = lines.len() as f32 * size * options.line_height_factor;
    let fits = within_budget && !overflows && total_height <= available_height;
    TextFitResult {
        font_size: size,
        lines,
        fits,
    }
}

/// Greedy word wrap at `font_size`.
///
/// Words are never split. A word wider than the line is placed on a line of
/// its own and flagged as overflow.
fn wrap_words<M>(
    words: &[&str],
    measure: &M,
    font_size: f32,
    max_width: f32,
    max_lines: Option<usize>,
) -> Wrap
where
    M: TextMeasure + ?Sized,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut overflows = false;

    for word in words {
        if current.is_empty() {
            current.push_str(word);
            overflows |= measure.measure_width(word, font_size) > max_width;
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.measure_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }

        if max_lines.is_some_and(|max| lines.len() + 2 > max) {
            return Wrap::TooManyLines;
        }
        lines.push(std::mem::take(&mut current));
        current.push_str(word);
        overflows |= measure.measure_width(word, font_size) > max_width;
    }

    lines.push(current);
    Wrap::Lines { lines, overflows }
}
