// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label templates: how request content is placed on a canvas.
//
//   fit     largest Helvetica-Bold text that fills the label (up to 3 lines)
//   simple  fixed-size Helvetica, one line per input line
//
// Any other template name draws a "not implemented" notice with the simple
// layout so the caller still gets a printable page.

use labelwerk_core::{PageGeometry, TextAlign, VerticalAlign};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::Canvas;
use crate::fit::{FitOptions, TextFitResult, fit};
use crate::metrics::StandardFont;

/// Font size used by the simple template when the request gives none.
pub const DEFAULT_SIMPLE_FONT_SIZE: f32 = 12.0;

/// Line pitch of the simple template, as a multiple of the font size.
const SIMPLE_LINE_HEIGHT: f32 = 1.25;

/// Horizontal inset of left/right aligned lines in the simple template (0.2in).
const SIMPLE_INSET_PT: f32 = 14.4;

/// Shown by the simple template when the content is empty.
const SIMPLE_PLACEHOLDER: &str = "Label Content";

/// Baseline of the first fitted line sits this many line pitches below the
/// top of the block.
const FIT_BASELINE_DROP: f32 = 0.75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelTemplate {
    Fit,
    Simple,
    Unsupported(String),
}

impl LabelTemplate {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "fit" => Self::Fit,
            "simple" => Self::Simple,
            _ => Self::Unsupported(name.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Fit => "fit",
            Self::Simple => "simple",
            Self::Unsupported(name) => name,
        }
    }

    /// Font the canvas must be created with for this template.
    pub fn font(&self) -> StandardFont {
        match self {
            Self::Fit => StandardFont::HelveticaBold,
            Self::Simple | Self::Unsupported(_) => StandardFont::Helvetica,
        }
    }
}

/// Text and placement hints taken from a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelContent {
    pub content: String,
    pub align: VerticalAlign,
    pub text_align: TextAlign,
    /// Only used by the simple template.
    pub font_size: Option<f32>,
}

/// Parse sizes like `"12pt"`, `"10.5"` or `" 9 pt "`.
pub fn parse_font_size(value: &str) -> Option<f32> {
    let number = value.trim().trim_end_matches("pt").trim();
    number
        .parse::<f32>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
}

/// Draw `content` onto `canvas` using `template`.
///
/// Returns the fit result when the fit template was used.
pub fn draw<C: Canvas>(
    canvas: &mut C,
    geometry: &PageGeometry,
    template: &LabelTemplate,
    content: &LabelContent,
    options: &FitOptions,
) -> Option<TextFitResult> {
    match template {
        LabelTemplate::Fit => Some(draw_fitted(canvas, geometry, content, options)),
        LabelTemplate::Simple => {
            draw_simple(canvas, geometry, content);
            None
        }
        LabelTemplate::Unsupported(name) => {
            let notice = LabelContent {
                content: format!("[{name}] template not implemented yet\n{}", content.content),
                align: VerticalAlign::Center,
                text_align: TextAlign::Center,
                font_size: Some(DEFAULT_SIMPLE_FONT_SIZE),
            };
            draw_simple(canvas, geometry, &notice);
            None
        }
    }
}

fn anchor_x(geometry: &PageGeometry, align: TextAlign, inset: f32) -> f32 {
    match align {
        TextAlign::Left => inset,
        TextAlign::Center => geometry.width() / 2.0,
        TextAlign::Right => geometry.width() - inset,
    }
}

fn draw_fitted<C: Canvas>(
    canvas: &mut C,
    geometry: &PageGeometry,
    content: &LabelContent,
    options: &FitOptions,
) -> TextFitResult {
    let result = fit(geometry, &content.content, &*canvas, options);

    // The fitted block is always centred vertically; `align` only applies to
    // the simple template.
    let line_height_factor = options.sanitized().line_height_factor;
    let line_height = result.font_size * line_height_factor;
    let top = (geometry.height() + result.block_height(line_height_factor)) / 2.0;
    let x = anchor_x(geometry, content.text_align, geometry.margin_x());

    let mut y = top - line_height * FIT_BASELINE_DROP;
    for line in &result.lines {
        canvas.draw_line(x, y, line, result.font_size, content.text_align);
        y -= line_height;
    }

    debug!(
        font_size = result.font_size,
        lines = result.lines.len(),
        fits = result.fits,
        "fitted label drawn"
    );
    result
}

fn draw_simple<C: Canvas>(canvas: &mut C, geometry: &PageGeometry, content: &LabelContent) {
    let font_size = content.font_size.unwrap_or(DEFAULT_SIMPLE_FONT_SIZE);
    let mut lines: Vec<&str> = content.content.lines().map(str::trim).collect();
    if content.content.trim().is_empty() {
        lines = vec![SIMPLE_PLACEHOLDER];
    }

    let line_height = font_size * SIMPLE_LINE_HEIGHT;
    let block_height = line_height * lines.len() as f32;
    let mut y = match content.align {
        VerticalAlign::Start => geometry.height() - line_height * 1.5,
        VerticalAlign::Center => (geometry.height() + block_height) / 2.0,
        VerticalAlign::End => block_height + line_height,
    };
    let x = anchor_x(geometry, content.text_align, SIMPLE_INSET_PT);

    for line in lines {
        canvas.draw_line(x, y, line, font_size, content.text_align);
        y -= line_height;
    }
}
