// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk Print — hands rendered labels to a printer. SumatraPDF is the
// primary backend; the operating system's print verb stands in when
// SumatraPDF is not installed.

pub mod backend;
pub mod dispatcher;
pub mod process;
pub mod shell;
pub mod sumatra;

pub use backend::{BackendError, BackendResult, BackendStatus, FallbackBackend, PrimaryBackend};
pub use dispatcher::{PrintDispatcher, PrintRequest};
pub use shell::ShellPrinter;
pub use sumatra::SumatraPrinter;
