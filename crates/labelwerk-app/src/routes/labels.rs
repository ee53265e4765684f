// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// POST /generate and GET /files/{name}.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use labelwerk_core::{PrintOutcome, TextAlign, VerticalAlign};
use labelwerk_document::template::{DEFAULT_SIMPLE_FONT_SIZE, parse_font_size};
use labelwerk_document::{LabelContent, LabelTemplate, TextFitResult};
use labelwerk_print::PrintRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ApiError;
use crate::services::labels::generate_label;
use crate::services::output::resolve_label_file;
use crate::state::AppState;

/// Label text and placement, as sent by clients.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelData {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub align: Option<String>,
    #[serde(default)]
    pub text_align: Option<String>,
    /// `"12pt"`, `"12"` or `12`.
    #[serde(default)]
    pub font_size: Option<Value>,
}

impl LabelData {
    fn to_content(&self) -> Result<LabelContent, ApiError> {
        let content = match &self.content {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        let font_size = match &self.font_size {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(
                parse_font_size(text)
                    .ok_or_else(|| ApiError::Validation(format!("invalid fontSize '{text}'")))?,
            ),
            Some(Value::Number(n)) => Some(
                n.as_f64()
                    .map(|size| size as f32)
                    .filter(|size| size.is_finite() && *size > 0.0)
                    .ok_or_else(|| ApiError::Validation(format!("invalid fontSize {n}")))?,
            ),
            Some(other) => {
                return Err(ApiError::Validation(format!("invalid fontSize {other}")));
            }
        };

        Ok(LabelContent {
            content,
            align: self
                .align
                .as_deref()
                .map(VerticalAlign::from_keyword)
                .unwrap_or_default(),
            text_align: self
                .text_align
                .as_deref()
                .map(TextAlign::from_keyword)
                .unwrap_or_default(),
            font_size: Some(font_size.unwrap_or(DEFAULT_SIMPLE_FONT_SIZE)),
        })
    }
}

fn default_copies() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub data: LabelData,
    #[serde(default)]
    pub label_size: Option<String>,
    #[serde(default = "default_copies")]
    pub copies: i64,
    #[serde(default)]
    pub print: bool,
    /// Printer override for this job.
    #[serde(default)]
    pub printer: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub ok: bool,
    pub template: String,
    pub label_size: String,
    pub file: String,
    pub path: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<TextFitResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print: Option<PrintOutcome>,
}

/// POST /generate
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let label_size = request
        .label_size
        .clone()
        .filter(|size| !size.trim().is_empty())
        .unwrap_or_else(|| state.config.default_label_size.clone());
    if request.copies < 1 {
        return Err(ApiError::Validation(format!(
            "copies must be at least 1 (got {})",
            request.copies
        )));
    }
    let copies = u32::try_from(request.copies)
        .map_err(|_| ApiError::Validation(format!("copies {} is too large", request.copies)))?;

    let template = LabelTemplate::parse(request.template.as_deref().unwrap_or("fit"));
    let content = request.data.to_content()?;

    let config = state.config.clone();
    let output_dir = state.output_dir.clone();
    let job_template = template.clone();
    let job_size = label_size.clone();
    let label = tokio::task::spawn_blocking(move || {
        generate_label(&config, &output_dir, &job_template, &job_size, &content)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;

    let print = if request.print {
        let job = PrintRequest {
            document_path: label.path.clone(),
            label_size: label_size.clone(),
            copies,
            printer_name: request.printer.clone().filter(|name| !name.trim().is_empty()),
        };
        Some(state.dispatcher.dispatch(&job).await)
    } else {
        None
    };

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    info!(file = %label.file_name, printed = print.as_ref().map(|p| p.success), "generate handled");

    Ok(Json(GenerateResponse {
        ok: true,
        template: template.name().to_string(),
        label_size,
        url: format!("http://{host}/files/{}", label.file_name),
        path: label.path.display().to_string(),
        file: label.file_name,
        fit: label.fit,
        print,
    }))
}

/// GET /files/{name}
pub async fn get_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let path = resolve_label_file(&state.output_dir, &name)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(labelwerk_core::LabelwerkError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("inline; filename=\"{name}\"")),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use labelwerk_core::LabelConfig;

    fn state(dir: &std::path::Path) -> AppState {
        let config = LabelConfig {
            output_dir: dir.to_path_buf(),
            ..LabelConfig::default()
        };
        AppState::new(config, dir.to_path_buf())
    }

    fn request(body: Value) -> GenerateRequest {
        serde_json::from_value(body).expect("request body")
    }

    fn host(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, value.parse().expect("header"));
        headers
    }

    #[tokio::test]
    async fn generate_writes_label_and_links_it() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let body = request(serde_json::json!({
            "template": "fit",
            "data": { "content": "HELLO WORLD", "textAlign": "left" },
            "labelSize": "3x1"
        }));

        let Json(response) = generate(State(state(tmp.path())), host("printer.local:3001"), Json(body))
            .await
            .expect("generate");

        assert!(response.ok);
        assert_eq!(response.label_size, "3x1");
        assert_eq!(response.template, "fit");
        assert!(response.file.starts_with("label_3x1_"));
        assert_eq!(response.url, format!("http://printer.local:3001/files/{}", response.file));
        assert!(std::path::Path::new(&response.path).is_file());
        assert!(response.print.is_none());
        assert!(response.fit.is_some());
    }

    #[tokio::test]
    async fn missing_fields_use_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let Json(response) = generate(State(state(tmp.path())), HeaderMap::new(), Json(request(serde_json::json!({}))))
            .await
            .expect("generate");

        assert_eq!(response.label_size, "2x4");
        assert_eq!(response.template, "fit");
        assert!(response.url.starts_with("http://localhost/files/"));
    }

    #[tokio::test]
    async fn unknown_label_size_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = generate(
            State(state(tmp.path())),
            HeaderMap::new(),
            Json(request(serde_json::json!({ "labelSize": "9x9" }))),
        )
        .await
        .expect_err("bad size");

        assert!(err.to_string().contains("2x4"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(tmp.path()).expect("read dir").count(), 0);
    }

    #[tokio::test]
    async fn zero_copies_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = generate(
            State(state(tmp.path())),
            HeaderMap::new(),
            Json(request(serde_json::json!({ "copies": 0, "print": true }))),
        )
        .await
        .expect_err("zero copies");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn font_size_accepts_points_and_numbers() {
        let data: LabelData = serde_json::from_value(serde_json::json!({ "fontSize": "18pt" })).expect("data");
        assert_eq!(data.to_content().expect("content").font_size, Some(18.0));
        let data: LabelData = serde_json::from_value(serde_json::json!({ "fontSize": 9 })).expect("data");
        assert_eq!(data.to_content().expect("content").font_size, Some(9.0));
        let data: LabelData = serde_json::from_value(serde_json::json!({ "fontSize": "huge" })).expect("data");
        assert!(data.to_content().is_err());
    }

    #[test]
    fn non_string_content_is_rendered_as_json() {
        let data: LabelData =
            serde_json::from_value(serde_json::json!({ "content": { "sku": 42 } })).expect("data");
        assert_eq!(data.to_content().expect("content").content, r#"{"sku":42}"#);
    }

    #[tokio::test]
    async fn serves_generated_files_as_pdf() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("label_2x4_x.pdf"), b"%PDF-1.7").expect("write");

        let response = get_file(State(state(tmp.path())), Path("label_2x4_x.pdf".to_string()))
            .await
            .expect("file");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"application/pdf"[..])
        );
    }

    #[tokio::test]
    async fn file_lookup_refuses_traversal_and_missing_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for name in ["../etc/passwd", "missing.pdf"] {
            let err = get_file(State(state(tmp.path())), Path(name.to_string()))
                .await
                .expect_err("not served");
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }
}
