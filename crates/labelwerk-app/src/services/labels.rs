// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label generation: validate the size, lay out the content and write the PDF
// into the output directory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use labelwerk_core::LabelConfig;
use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_document::{LabelContent, LabelTemplate, LabelWriter, TextFitResult};
use tracing::info;

use super::output::label_filename;

/// A label PDF that has been written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedLabel {
    pub file_name: String,
    pub path: PathBuf,
    pub fit: Option<TextFitResult>,
}

/// Render `content` at `label_size` into a new file under `output_dir`.
pub fn generate_label(
    config: &LabelConfig,
    output_dir: &Path,
    template: &LabelTemplate,
    label_size: &str,
    content: &LabelContent,
) -> Result<GeneratedLabel> {
    if !config.is_known_size(label_size) {
        return Err(LabelwerkError::UnknownLabelSize {
            key: label_size.to_string(),
            valid: config.size_keys(),
        });
    }
    let geometry = config.geometry(label_size)?;

    let file_name = label_filename(label_size, Utc::now());
    let path = output_dir.join(&file_name);

    let mut writer = LabelWriter::new(geometry);
    writer.set_title(format!("Label {label_size}"));
    let fit = writer.write_to_file(template, content, &path)?;

    info!(
        file = %file_name,
        template = template.name(),
        label_size,
        "label generated"
    );
    Ok(GeneratedLabel {
        file_name,
        path,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> LabelContent {
        LabelContent {
            content: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn writes_a_pdf_named_after_the_size() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let label = generate_label(
            &LabelConfig::default(),
            tmp.path(),
            &LabelTemplate::Fit,
            "3x1",
            &content("HELLO WORLD"),
        )
        .expect("generate");

        assert!(label.file_name.starts_with("label_3x1_"));
        assert!(label.file_name.ends_with(".pdf"));
        let bytes = std::fs::read(&label.path).expect("read");
        assert!(bytes.starts_with(b"%PDF"));
        let fit = label.fit.expect("fit template reports its layout");
        assert!(fit.fits);
        assert_eq!(fit.lines, vec!["HELLO WORLD".to_string()]);
    }

    #[test]
    fn simple_template_has_no_fit_result() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let label = generate_label(
            &LabelConfig::default(),
            tmp.path(),
            &LabelTemplate::Simple,
            "2x4",
            &content("Line one\nLine two"),
        )
        .expect("generate");
        assert!(label.fit.is_none());
        assert!(label.path.is_file());
    }

    #[test]
    fn unknown_size_writes_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = generate_label(
            &LabelConfig::default(),
            tmp.path(),
            &LabelTemplate::Fit,
            "9x9",
            &content("x"),
        )
        .expect_err("unknown size");

        assert!(matches!(err, LabelwerkError::UnknownLabelSize { .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).expect("read dir").count(), 0);
    }
}
