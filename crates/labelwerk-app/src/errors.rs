// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use labelwerk_core::LabelwerkError;
use serde_json::json;
use thiserror::Error;

/// Error returned by route handlers; renders as `{error: {code, message}}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Label(#[from] LabelwerkError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            Self::Label(LabelwerkError::FileNotFound(name)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("no such label file: {name}"),
            ),
            Self::Label(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
            Self::Label(err) => {
                tracing::error!(error = %err, "label operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LABEL_ERROR",
                    "the label could not be produced".to_string(),
                )
            }
            Self::Internal(err) => {
                tracing::error!("Internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_size_is_a_bad_request() {
        let err = ApiError::from(LabelwerkError::UnknownLabelSize {
            key: "9x9".into(),
            valid: vec!["2x4".into()],
        });
        assert!(err.to_string().contains("9x9"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = ApiError::from(LabelwerkError::FileNotFound("label.pdf".into()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rendering_failures_are_server_errors() {
        let err = ApiError::from(LabelwerkError::PdfError("font table".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ApiError::from(anyhow::anyhow!("join error"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
