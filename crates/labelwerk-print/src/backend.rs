// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printing backend capabilities.
//
// Backends report failures in two classes. `Unavailable` means the mechanism
// itself is missing (no executable, no driver) and is the only class that
// lets the dispatcher move on to the fallback. `JobFailed` means the backend
// ran and the job failed; the same root cause would hit any other backend,
// so it is terminal.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a backend could not print.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("print job failed: {0}")]
    JobFailed(String),
}

impl BackendError {
    /// Classify a free-text failure from a backend that has neither a spawn
    /// error nor an exit code to go on. Only an explicit "not found" counts
    /// as unavailable. Process-based backends never use this.
    pub fn from_legacy_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        if lower.contains("not found") || lower.contains("is not recognized") {
            Self::Unavailable(message)
        } else {
            Self::JobFailed(message)
        }
    }

    /// The backend's own message, without the class prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Unavailable(detail) | Self::JobFailed(detail) => detail,
        }
    }
}

/// Success carries the backend's message; failure carries its class.
pub type BackendResult = std::result::Result<String, BackendError>;

/// Availability report used by the service status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub name: String,
    pub available: bool,
    /// Executable path or mechanism description.
    pub detail: String,
}

/// Preferred backend; prints all copies of a job in one invocation.
#[async_trait]
pub trait PrimaryBackend: Send + Sync {
    fn status(&self) -> BackendStatus;

    async fn print(&self, document: &Path, copies: u32, printer_name: Option<&str>) -> BackendResult;
}

/// Secondary backend; prints exactly one copy per invocation.
#[async_trait]
pub trait FallbackBackend: Send + Sync {
    fn status(&self) -> BackendStatus;

    async fn print(&self, document: &Path, printer_name: Option<&str>) -> BackendResult;
}
