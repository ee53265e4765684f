// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LabelwerkError, Result};
use crate::types::{PageGeometry, POINTS_PER_INCH};

/// Physical size of a label stock, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelDimensions {
    pub width_in: f32,
    pub height_in: f32,
}

impl LabelDimensions {
    pub const fn new(width_in: f32, height_in: f32) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Page size in points with the long edge horizontal.
    ///
    /// Label stock is fed in either orientation, so `1x3` and `3x1` render
    /// the same landscape page.
    pub fn landscape_points(&self) -> (f32, f32) {
        let long = self.width_in.max(self.height_in) * POINTS_PER_INCH;
        let short = self.width_in.min(self.height_in) * POINTS_PER_INCH;
        (long, short)
    }
}

/// Settings for the printing backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Explicit path to the SumatraPDF executable. When unset the well-known
    /// install locations and `PATH` are searched.
    pub sumatra_path: Option<PathBuf>,
    /// Base `-print-settings` string; the copy count is appended per job.
    pub print_settings: String,
    /// Printer to use instead of the system default.
    pub printer_name: Option<String>,
    /// Upper bound on a single backend process, in seconds.
    pub timeout_secs: u64,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            sumatra_path: None,
            print_settings: "landscape,fit".into(),
            printer_name: None,
            timeout_secs: 30,
        }
    }
}

/// Immutable service settings, built once at start-up and passed down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Directory generated PDFs are written to.
    pub output_dir: PathBuf,
    /// Label size used when a request does not name one.
    pub default_label_size: String,
    /// Allow-list of label sizes, keyed by the name clients send.
    pub label_sizes: BTreeMap<String, LabelDimensions>,
    /// Margin applied on every edge, in inches.
    pub margin_in: f32,
    pub printer: PrinterConfig,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let label_sizes = [
            ("1x3", LabelDimensions::new(1.0, 3.0)),
            ("2x4", LabelDimensions::new(2.0, 4.0)),
            ("4x6", LabelDimensions::new(4.0, 6.0)),
            ("3x1", LabelDimensions::new(3.0, 1.0)),
            ("4x2", LabelDimensions::new(4.0, 2.0)),
            ("6x4", LabelDimensions::new(6.0, 4.0)),
        ]
        .into_iter()
        .map(|(key, dims)| (key.to_string(), dims))
        .collect();

        Self {
            output_dir: PathBuf::from("labels"),
            default_label_size: "2x4".into(),
            label_sizes,
            margin_in: 0.15,
            printer: PrinterConfig::default(),
        }
    }
}

impl LabelConfig {
    /// Whether `key` is on the label-size allow-list.
    pub fn is_known_size(&self, key: &str) -> bool {
        self.label_sizes.contains_key(key)
    }

    /// Allowed label-size keys in sorted order.
    pub fn size_keys(&self) -> Vec<String> {
        self.label_sizes.keys().cloned().collect()
    }

    pub fn dimensions(&self, key: &str) -> Result<LabelDimensions> {
        self.label_sizes
            .get(key)
            .copied()
            .ok_or_else(|| LabelwerkError::UnknownLabelSize {
                key: key.to_string(),
                valid: self.size_keys(),
            })
    }

    /// Landscape page geometry for a label size, margins applied.
    pub fn geometry(&self, key: &str) -> Result<PageGeometry> {
        let (width, height) = self.dimensions(key)?.landscape_points();
        let margin = self.margin_in * POINTS_PER_INCH;
        PageGeometry::new(width, height, margin, margin)
    }

    /// Check internal consistency; called once after loading.
    pub fn validate(&self) -> Result<()> {
        if self.label_sizes.is_empty() {
            return Err(LabelwerkError::Config("no label sizes configured".into()));
        }
        if !self.is_known_size(&self.default_label_size) {
            return Err(LabelwerkError::Config(format!(
                "default label size '{}' is not one of {:?}",
                self.default_label_size,
                self.size_keys()
            )));
        }
        if self.printer.timeout_secs == 0 {
            return Err(LabelwerkError::Config("print timeout must be at least 1s".into()));
        }
        for key in self.label_sizes.keys() {
            self.geometry(key)?;
        }
        Ok(())
    }
}
