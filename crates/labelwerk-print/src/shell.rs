// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OS print verb (fallback backend).
//
// On Windows the document is handed to its associated application through
// PowerShell's `Start-Process -Verb Print` (or `PrintTo` for a named
// printer). Elsewhere it goes to the CUPS `lp` command. Neither path has a
// reliable copies setting, so the dispatcher calls this once per copy.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::{BackendError, BackendResult, BackendStatus, FallbackBackend};
use crate::process::{find_on_path, run_print_command};

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

/// Quote a value for a single-quoted PowerShell string.
fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `Start-Process` invocation for the Windows shell print verb.
pub fn windows_command(document: &Path, printer_name: Option<&str>) -> PrintCommand {
    let file = powershell_quote(&document.display().to_string());
    let script = match printer_name {
        Some(printer) => format!(
            "Start-Process -FilePath {file} -Verb PrintTo -ArgumentList {} -WindowStyle Hidden -Wait",
            powershell_quote(&format!("\"{printer}\""))
        ),
        None => format!("Start-Process -FilePath {file} -Verb Print -WindowStyle Hidden -Wait"),
    };
    PrintCommand {
        program: "powershell".into(),
        args: vec![
            "-NoProfile".into(),
            "-NonInteractive".into(),
            "-Command".into(),
            script.into(),
        ],
    }
}

/// CUPS `lp` invocation for one copy.
pub fn lp_command(document: &Path, printer_name: Option<&str>) -> PrintCommand {
    let mut args: Vec<OsString> = Vec::with_capacity(5);
    if let Some(printer) = printer_name {
        args.push("-d".into());
        args.push(printer.into());
    }
    args.push("-n".into());
    args.push("1".into());
    args.push(document.as_os_str().to_owned());
    PrintCommand {
        program: "lp".into(),
        args,
    }
}

fn platform_command(document: &Path, printer_name: Option<&str>) -> PrintCommand {
    if cfg!(windows) {
        windows_command(document, printer_name)
    } else {
        lp_command(document, printer_name)
    }
}

/// Fallback backend using the operating system's print mechanism.
#[derive(Debug, Clone)]
pub struct ShellPrinter {
    timeout: Duration,
}

impl ShellPrinter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl FallbackBackend for ShellPrinter {
    fn status(&self) -> BackendStatus {
        let command = platform_command(Path::new(""), None);
        let program = command.program.to_string_lossy().into_owned();
        let exe = format!("{program}.exe");
        let found = find_on_path(&[program.as_str(), exe.as_str()]);
        BackendStatus {
            name: "shell".into(),
            available: found.is_some(),
            detail: found
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| format!("{program} not found on PATH")),
        }
    }

    async fn print(&self, document: &Path, printer_name: Option<&str>) -> BackendResult {
        if !document.is_file() {
            return Err(BackendError::JobFailed(format!(
                "document {} does not exist",
                document.display()
            )));
        }

        let command = platform_command(document, printer_name);
        debug!(program = ?command.program, "printing one copy via OS print verb");
        run_print_command(&command.program, &command.args, self.timeout).await
    }
}
