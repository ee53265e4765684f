// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service configuration from the environment (and an optional `.env`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use labelwerk_core::LabelConfig;

const DEFAULT_PORT: u16 = 3001;

/// Process-level settings plus the label configuration handed to the
/// library crates.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub rust_log: String,
    pub labels: LabelConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // a missing .env is fine
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut labels = LabelConfig::default();
        if let Some(dir) = var("OUTPUT_DIR") {
            labels.output_dir = PathBuf::from(dir);
        }
        if let Some(size) = var("LABEL_SIZE") {
            labels.default_label_size = size;
        }
        if let Some(path) = var("SUMATRA_PATH") {
            labels.printer.sumatra_path = Some(PathBuf::from(path));
        }
        if let Some(settings) = var("PRINT_SETTINGS") {
            labels.printer.print_settings = settings;
        }
        if let Some(printer) = var("PRINTER_NAME") {
            labels.printer.printer_name = Some(printer);
        }
        if let Some(secs) = var("PRINT_TIMEOUT_SECS") {
            labels.printer.timeout_secs = secs
                .parse()
                .context("PRINT_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        labels.validate().context("invalid label configuration")?;

        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            labels,
        })
    }
}
