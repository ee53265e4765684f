// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelwerk-document — Label layout and rendering for Labelwerk.
//
// Provides the auto-fit text layout (largest font size that fills a label in
// at most three lines), base-14 font metrics, the label templates, and a
// printpdf-backed canvas that writes the single-page label PDF.

pub mod canvas;
pub mod fit;
pub mod metrics;
pub mod pdf;
pub mod template;

// Re-export the primary items so callers can use `labelwerk_document::fit` etc.
pub use canvas::Canvas;
pub use fit::{FitOptions, TextFitResult, fit};
pub use metrics::{StandardFont, TextMeasure};
pub use pdf::writer::{LabelWriter, PdfCanvas, RenderedLabel};
pub use template::{LabelContent, LabelTemplate};
