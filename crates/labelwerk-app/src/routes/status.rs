// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use axum::Json;
use axum::extract::State;
use labelwerk_print::{FallbackBackend, PrimaryBackend};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "outputDir": state.output_dir.display().to_string(),
        "defaultLabelSize": state.config.default_label_size,
        "labelSizes": state.config.size_keys(),
        "endpoints": {
            "POST /generate": "Generate a PDF label and optionally print it",
            "GET /files/{name}": "Download a generated PDF",
            "GET /printer": "Printing backend status",
        }
    }))
}

/// GET /printer
pub async fn printer(State(state): State<AppState>) -> Json<Value> {
    let primary = state.dispatcher.primary().status();
    let fallback = state.dispatcher.fallback().status();
    let printer = &state.config.printer;
    Json(json!({
        "primary": primary,
        "fallback": fallback,
        "printSettings": printer.print_settings,
        "printerName": printer.printer_name,
        "timeoutSecs": printer.timeout_secs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelwerk_core::LabelConfig;

    #[tokio::test]
    async fn root_lists_sizes_and_endpoints() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let state = AppState::new(LabelConfig::default(), tmp.path().to_path_buf());

        let Json(body) = root(State(state)).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["defaultLabelSize"], "2x4");
        assert_eq!(body["labelSizes"].as_array().map(Vec::len), Some(6));
        assert!(body["endpoints"]["POST /generate"].is_string());
    }

    #[tokio::test]
    async fn printer_reports_both_backends() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = LabelConfig::default();
        config.printer.sumatra_path = Some(tmp.path().join("SumatraPDF.exe"));
        config.printer.printer_name = Some("Zebra".into());
        let state = AppState::new(config, tmp.path().to_path_buf());

        let Json(body) = printer(State(state)).await;
        assert_eq!(body["primary"]["name"], "sumatra");
        assert_eq!(body["primary"]["available"], false);
        assert_eq!(body["fallback"]["name"], "shell");
        assert_eq!(body["printSettings"], "landscape,fit");
        assert_eq!(body["printerName"], "Zebra");
        assert_eq!(body["timeoutSecs"], 30);
    }
}
