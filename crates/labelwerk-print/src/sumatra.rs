// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SumatraPDF command-line printing (primary backend).
//
// SumatraPDF prints silently and honours copies natively through its
// `-print-settings` string (e.g. `landscape,fit,3x`), so a whole job is a
// single invocation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use labelwerk_core::PrinterConfig;
use tracing::{info, warn};

use crate::backend::{BackendError, BackendResult, BackendStatus, PrimaryBackend};
use crate::process::{find_on_path, run_print_command};

/// Executable names searched for on `PATH`.
const EXECUTABLE_NAMES: &[&str] = &["SumatraPDF.exe", "SumatraPDF"];

/// Usual install locations on Windows.
fn install_locations() -> Vec<PathBuf> {
    let mut locations = vec![
        PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"),
        PathBuf::from(r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe"),
    ];
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        locations.push(PathBuf::from(local).join("SumatraPDF").join("SumatraPDF.exe"));
    }
    locations
}

/// Primary backend driving the SumatraPDF executable.
#[derive(Debug, Clone)]
pub struct SumatraPrinter {
    executable: Option<PathBuf>,
    print_settings: String,
    timeout: Duration,
}

impl SumatraPrinter {
    pub fn new(executable: Option<PathBuf>, print_settings: impl Into<String>, timeout: Duration) -> Self {
        Self {
            executable,
            print_settings: print_settings.into(),
            timeout,
        }
    }

    /// Locate the executable: configured path first, then install
    /// locations, then `PATH`.
    pub fn discover(config: &PrinterConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let executable = match &config.sumatra_path {
            Some(path) if path.is_file() => Some(path.clone()),
            Some(path) => {
                warn!(path = %path.display(), "configured SumatraPDF path does not exist");
                None
            }
            None => install_locations()
                .into_iter()
                .find(|candidate| candidate.is_file())
                .or_else(|| find_on_path(EXECUTABLE_NAMES)),
        };

        match &executable {
            Some(path) => info!(path = %path.display(), "SumatraPDF found"),
            None => warn!("SumatraPDF not found; printing will use the fallback backend"),
        }
        Self::new(executable, config.print_settings.clone(), timeout)
    }

    /// Settings string with the copy count appended.
    pub fn settings_for(&self, copies: u32) -> String {
        let base = self.print_settings.trim().trim_end_matches(',');
        if base.is_empty() {
            format!("{copies}x")
        } else {
            format!("{base},{copies}x")
        }
    }

    /// Command-line arguments for one job.
    pub fn build_args(&self, document: &Path, copies: u32, printer_name: Option<&str>) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(6);
        match printer_name {
            Some(name) => {
                args.push("-print-to".into());
                args.push(name.into());
            }
            None => args.push("-print-to-default".into()),
        }
        args.push("-print-settings".into());
        args.push(self.settings_for(copies).into());
        args.push("-silent".into());
        args.push(document.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl PrimaryBackend for SumatraPrinter {
    fn status(&self) -> BackendStatus {
        BackendStatus {
            name: "sumatra".into(),
            available: self.executable.is_some(),
            detail: self
                .executable
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "SumatraPDF executable not found".into()),
        }
    }

    async fn print(&self, document: &Path, copies: u32, printer_name: Option<&str>) -> BackendResult {
        let Some(executable) = &self.executable else {
            return Err(BackendError::Unavailable("SumatraPDF executable not found".into()));
        };
        if !document.is_file() {
            return Err(BackendError::JobFailed(format!(
                "document {} does not exist",
                document.display()
            )));
        }

        let args = self.build_args(document, copies, printer_name);
        run_print_command(executable.as_os_str(), &args, self.timeout).await?;
        Ok(format!(
            "sent {copies} {} to {} via SumatraPDF",
            if copies == 1 { "copy" } else { "copies" },
            printer_name.unwrap_or("default printer")
        ))
    }
}
