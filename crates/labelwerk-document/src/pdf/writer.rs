// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer. Renders a single label page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: the page is built as a `Vec<Op>`
// operation list, wrapped in a `PdfPage` and serialised via
// `PdfDocument::save()`.

use std::path::Path;

use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_core::{PageGeometry, TextAlign};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, info, instrument, warn};

use crate::canvas::{Canvas, line_origin};
use crate::fit::{FitOptions, TextFitResult};
use crate::metrics::{StandardFont, TextMeasure};
use crate::template::{self, LabelContent, LabelTemplate};

const MM_PER_PT: f32 = 25.4 / 72.0;

fn builtin(font: StandardFont) -> BuiltinFont {
    match font {
        StandardFont::Helvetica => BuiltinFont::Helvetica,
        StandardFont::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

/// A single PDF page that text lines are drawn onto.
pub struct PdfCanvas {
    width: f32,
    height: f32,
    font: StandardFont,
    title: String,
    ops: Vec<Op>,
}

impl PdfCanvas {
    /// Blank page of `width` x `height` points.
    pub fn new(width: f32, height: f32, font: StandardFont, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            font,
            title: title.into(),
            ops: Vec::new(),
        }
    }

    /// Number of lines drawn so far.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::WriteTextBuiltinFont { .. }))
            .count()
    }
}

impl TextMeasure for PdfCanvas {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        self.font.measure_width(text, font_size)
    }
}

impl Canvas for PdfCanvas {
    fn draw_line(&mut self, x: f32, y: f32, text: &str, font_size: f32, align: TextAlign) {
        let left = line_origin(x, self.measure_width(text, font_size), align);

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(left),
                y: Pt(y),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size),
            font: builtin(self.font),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: builtin(self.font),
        });
        self.ops.push(Op::EndTextSection);
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&self.title);
        let page = PdfPage::new(
            Mm(self.width * MM_PER_PT),
            Mm(self.height * MM_PER_PT),
            self.ops,
        );
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }
        if output.is_empty() {
            return Err(LabelwerkError::PdfError("printpdf produced no output".into()));
        }
        Ok(output)
    }
}

/// Rendered label bytes plus the layout that produced them.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub bytes: Vec<u8>,
    /// Present for the fit template.
    pub fit: Option<TextFitResult>,
}

/// Renders label content onto a fixed label page.
pub struct LabelWriter {
    geometry: PageGeometry,
    fit_options: FitOptions,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl LabelWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            fit_options: FitOptions::default(),
            title: None,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Draw `content` onto a fresh page without serialising it.
    fn lay_out(&self, template: &LabelTemplate, content: &LabelContent) -> (PdfCanvas, Option<TextFitResult>) {
        let title = self.title.as_deref().unwrap_or("Labelwerk Label");
        let mut canvas = PdfCanvas::new(
            self.geometry.width(),
            self.geometry.height(),
            template.font(),
            title,
        );

        let fit = template::draw(&mut canvas, &self.geometry, template, content, &self.fit_options);
        if let Some(result) = &fit {
            if !result.fits {
                warn!(
                    font_size = result.font_size,
                    "text does not fit the label; printing best effort"
                );
            }
        }
        debug!(lines = canvas.line_count(), "label laid out");
        (canvas, fit)
    }

    /// Render `content` with `template` into PDF bytes.
    #[instrument(skip_all, fields(template = template.name(), text_len = content.content.len()))]
    pub fn render(&self, template: &LabelTemplate, content: &LabelContent) -> Result<RenderedLabel> {
        let (canvas, fit) = self.lay_out(template, content);
        let bytes = canvas.finish()?;
        Ok(RenderedLabel { bytes, fit })
    }

    /// Render and write the label directly to a file.
    ///
    /// Returns the fit layout when the fit template was used.
    #[instrument(skip_all, fields(template = template.name(), path = %path.as_ref().display()))]
    pub fn write_to_file(
        &self,
        template: &LabelTemplate,
        content: &LabelContent,
        path: impl AsRef<Path>,
    ) -> Result<Option<TextFitResult>> {
        let (canvas, fit) = self.lay_out(template, content);
        canvas.save(path.as_ref())?;
        info!("Wrote label PDF to {}", path.as_ref().display());
        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelwerk_core::LabelConfig;

    fn writer(size: &str) -> LabelWriter {
        let geometry = LabelConfig::default().geometry(size).expect("known size");
        LabelWriter::new(geometry)
    }

    fn content(text: &str) -> LabelContent {
        LabelContent {
            content: text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn renders_a_single_page_pdf() {
        let rendered = writer("2x4")
            .render(&LabelTemplate::Fit, &content("HELLO WORLD"))
            .expect("render");

        assert!(rendered.bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&rendered.bytes).expect("valid pdf");
        assert_eq!(doc.get_pages().len(), 1);
        assert!(rendered.fit.expect("fit layout").fits);
    }

    #[test]
    fn simple_template_has_no_fit_result() {
        let rendered = writer("4x6")
            .render(&LabelTemplate::Simple, &content("Line one\nLine two"))
            .expect("render");
        assert!(rendered.fit.is_none());
        let doc = lopdf::Document::load_mem(&rendered.bytes).expect("valid pdf");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn canvas_draws_one_text_run_per_line() {
        let mut canvas = PdfCanvas::new(216.0, 72.0, StandardFont::HelveticaBold, "t");
        canvas.draw_line(108.0, 36.0, "A", 12.0, TextAlign::Center);
        canvas.draw_line(108.0, 20.0, "B", 12.0, TextAlign::Center);
        assert_eq!(canvas.line_count(), 2);
    }

    #[test]
    fn write_to_file_persists_the_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("label.pdf");
        let mut writer = writer("3x1");
        writer.set_title("Bin label");

        let fit = writer
            .write_to_file(&LabelTemplate::Fit, &content(""), &path)
            .expect("write")
            .expect("fit layout");
        assert_eq!(fit.lines, vec!["LABEL".to_string()]);

        let bytes = std::fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&bytes).expect("valid pdf");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn write_to_file_reports_unwritable_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-dir").join("label.pdf");
        let result = writer("2x4").write_to_file(&LabelTemplate::Simple, &content("x"), &path);
        assert!(matches!(result, Err(LabelwerkError::Io(_))));
    }
}
