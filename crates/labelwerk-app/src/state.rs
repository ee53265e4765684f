// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared state injected into every route handler.

use std::path::PathBuf;
use std::sync::Arc;

use labelwerk_core::LabelConfig;
use labelwerk_print::{PrintDispatcher, ShellPrinter, SumatraPrinter};

pub type SystemDispatcher = PrintDispatcher<SumatraPrinter, ShellPrinter>;

/// Cheap to clone; everything inside is immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LabelConfig>,
    /// Absolute form of `config.output_dir`.
    pub output_dir: Arc<PathBuf>,
    pub dispatcher: Arc<SystemDispatcher>,
}

impl AppState {
    pub fn new(config: LabelConfig, output_dir: PathBuf) -> Self {
        let dispatcher = PrintDispatcher::system(&config);
        Self {
            config: Arc::new(config),
            output_dir: Arc::new(output_dir),
            dispatcher: Arc::new(dispatcher),
        }
    }
}
