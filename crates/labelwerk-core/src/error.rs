// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Labelwerk.

use thiserror::Error;

/// Top-level error type for all Labelwerk operations.
///
/// Printing never surfaces through this type: the dispatcher always returns a
/// populated `PrintOutcome`. These variants cover request validation, page
/// rendering and file handling.
#[derive(Debug, Error)]
pub enum LabelwerkError {
    // -- Request validation --
    #[error("invalid labelSize '{key}'. Use one of {valid:?}")]
    UnknownLabelSize { key: String, valid: Vec<String> },

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    // -- Rendering --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage --
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LabelwerkError {
    /// Whether the error was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLabelSize { .. }
                | Self::InvalidGeometry(_)
                | Self::FileNotFound(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_size_lists_valid_keys() {
        let err = LabelwerkError::UnknownLabelSize {
            key: "9x9".into(),
            valid: vec!["1x3".into(), "2x4".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("9x9"));
        assert!(msg.contains("2x4"));
        assert!(err.is_client_error());
    }

    #[test]
    fn io_is_a_server_error() {
        let err = LabelwerkError::from(std::io::Error::other("disk full"));
        assert!(!err.is_client_error());
    }
}
