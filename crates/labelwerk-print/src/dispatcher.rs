// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print dispatch: deliver a rendered label to a printer.
//
//   NotAttempted ──► TryingPrimary ──► Succeeded
//        │                 │
//        │                 ├─ unavailable ──► TryingFallback ──► Succeeded | Failed
//        │                 └─ job failed ───► Failed
//        └─ unknown size / no copies ───────► Failed
//
// The fallback replaces a primary that is *missing*, never one that ran and
// failed. Fallback copies go out one at a time and the loop stops at the
// first failure; copies already printed stay printed.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use labelwerk_core::{BackendKind, LabelConfig, PrintAttempt, PrintMethod, PrintOutcome};
use tracing::{debug, info, instrument, warn};

use crate::backend::{BackendError, FallbackBackend, PrimaryBackend};
use crate::shell::ShellPrinter;
use crate::sumatra::SumatraPrinter;

/// One print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    pub document_path: PathBuf,
    pub label_size: String,
    pub copies: u32,
    /// Overrides the dispatcher's default printer.
    pub printer_name: Option<String>,
}

/// Dispatch progress. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DispatchState {
    NotAttempted,
    TryingPrimary,
    TryingFallback { reason: String },
    Succeeded(PrintOutcome),
    Failed(PrintOutcome),
}

/// Tries the primary backend, falling back only when it is unavailable.
///
/// Holds no per-job state; one dispatcher serves concurrent requests.
pub struct PrintDispatcher<P, F> {
    primary: P,
    fallback: F,
    allowed_sizes: BTreeSet<String>,
    default_printer: Option<String>,
}

impl PrintDispatcher<SumatraPrinter, ShellPrinter> {
    /// Dispatcher over the system backends described by `config`.
    pub fn system(config: &LabelConfig) -> Self {
        let primary = SumatraPrinter::discover(&config.printer);
        let fallback = ShellPrinter::new(Duration::from_secs(config.printer.timeout_secs));
        Self::from_config(config, primary, fallback)
    }
}

impl<P, F> PrintDispatcher<P, F>
where
    P: PrimaryBackend,
    F: FallbackBackend,
{
    pub fn new(primary: P, fallback: F, allowed_sizes: impl IntoIterator<Item = String>) -> Self {
        Self {
            primary,
            fallback,
            allowed_sizes: allowed_sizes.into_iter().collect(),
            default_printer: None,
        }
    }

    /// Allow-list and default printer taken from `config`.
    pub fn from_config(config: &LabelConfig, primary: P, fallback: F) -> Self {
        let mut dispatcher = Self::new(primary, fallback, config.size_keys());
        dispatcher.default_printer = config.printer.printer_name.clone();
        dispatcher
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Run the job to a terminal state. Never fails; every path produces an
    /// outcome describing the stage that decided it.
    #[instrument(skip_all, fields(
        document = %request.document_path.display(),
        label_size = %request.label_size,
        copies = request.copies,
    ))]
    pub async fn dispatch(&self, request: &PrintRequest) -> PrintOutcome {
        let printer_name = request
            .printer_name
            .as_deref()
            .or(self.default_printer.as_deref());
        let mut attempts: Vec<PrintAttempt> = Vec::new();
        let mut state = DispatchState::NotAttempted;

        let outcome = loop {
            state = match state {
                DispatchState::Succeeded(outcome) | DispatchState::Failed(outcome) => break outcome,
                pending => self.advance(pending, request, printer_name, &mut attempts).await,
            };
        };

        debug!(?attempts, "dispatch attempts");
        if outcome.success {
            info!(method = outcome.method.as_str(), copies = outcome.copies_confirmed, "print dispatched");
        } else {
            warn!(method = outcome.method.as_str(), message = %outcome.message, "print failed");
        }
        outcome
    }

    async fn advance(
        &self,
        state: DispatchState,
        request: &PrintRequest,
        printer_name: Option<&str>,
        attempts: &mut Vec<PrintAttempt>,
    ) -> DispatchState {
        let copies = request.copies;
        match state {
            DispatchState::NotAttempted => self.validate(request),

            DispatchState::TryingPrimary => {
                let result = self
                    .primary
                    .print(&request.document_path, copies, printer_name)
                    .await;
                attempts.push(PrintAttempt {
                    backend: BackendKind::Primary,
                    success: result.is_ok(),
                    message: match &result {
                        Ok(message) => message.clone(),
                        Err(err) => err.to_string(),
                    },
                });

                match result {
                    Ok(message) => {
                        DispatchState::Succeeded(PrintOutcome::succeeded(PrintMethod::Primary, message, copies))
                    }
                    Err(BackendError::Unavailable(reason)) => {
                        info!(%reason, "primary backend unavailable; using fallback");
                        DispatchState::TryingFallback { reason }
                    }
                    Err(BackendError::JobFailed(detail)) => DispatchState::Failed(PrintOutcome::failed(
                        PrintMethod::Primary,
                        format!("primary backend failed: {detail}"),
                        copies,
                        0,
                    )),
                }
            }

            DispatchState::TryingFallback { reason } => {
                for copy in 1..=copies {
                    let result = self.fallback.print(&request.document_path, printer_name).await;
                    attempts.push(PrintAttempt {
                        backend: BackendKind::Fallback,
                        success: result.is_ok(),
                        message: match &result {
                            Ok(message) => message.clone(),
                            Err(err) => err.to_string(),
                        },
                    });

                    if let Err(err) = result {
                        return DispatchState::Failed(PrintOutcome::failed(
                            PrintMethod::Fallback,
                            format!(
                                "fallback failed at copy {copy} of {copies}: {} (primary unavailable: {reason})",
                                err.detail()
                            ),
                            copies,
                            copy - 1,
                        ));
                    }
                    debug!(copy, copies, "fallback copy printed");
                }

                DispatchState::Succeeded(PrintOutcome::succeeded(
                    PrintMethod::Fallback,
                    format!("printed {copies} of {copies} via fallback (primary unavailable: {reason})"),
                    copies,
                ))
            }

            terminal @ (DispatchState::Succeeded(_) | DispatchState::Failed(_)) => terminal,
        }
    }

    fn validate(&self, request: &PrintRequest) -> DispatchState {
        if !self.allowed_sizes.contains(&request.label_size) {
            let allowed: Vec<&str> = self.allowed_sizes.iter().map(String::as_str).collect();
            return DispatchState::Failed(PrintOutcome::failed(
                PrintMethod::Validation,
                format!(
                    "invalid label size '{}'; expected one of {allowed:?}",
                    request.label_size
                ),
                request.copies,
                0,
            ));
        }
        if request.copies == 0 {
            return DispatchState::Failed(PrintOutcome::failed(
                PrintMethod::Validation,
                "copies must be at least 1",
                0,
                0,
            ));
        }
        DispatchState::TryingPrimary
    }
}
