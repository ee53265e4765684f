// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounded execution of external print commands.
//
// Every backend ends up spawning a process (SumatraPDF, PowerShell, lp). The
// process gets a hard deadline; when it expires the child is killed and the
// job counts as failed, never as unavailable.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, BackendResult};

/// Exit code a POSIX shell uses for "command not found".
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Exit code `cmd.exe` uses for "is not recognized as a command".
const EXIT_CMD_NOT_RECOGNIZED: i32 = 9009;

/// Run `program` with `args`, waiting at most `timeout`.
///
/// Returns the trimmed stdout (or a short summary) on a zero exit status.
pub async fn run_print_command(program: &OsStr, args: &[OsString], timeout: Duration) -> BackendResult {
    let name = Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .into_owned();
    debug!(program = %name, ?args, timeout_secs = timeout.as_secs(), "spawning print command");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(program = %name, "print executable not found");
            return Err(BackendError::Unavailable(format!("{name} not found")));
        }
        Err(e) => {
            return Err(BackendError::JobFailed(format!("failed to start {name}: {e}")));
        }
    };

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(BackendError::JobFailed(format!("waiting for {name}: {e}")));
        }
        Err(_) => {
            warn!(program = %name, timeout_secs = timeout.as_secs(), "print command timed out");
            return Err(BackendError::JobFailed(format!(
                "{name} timed out after {}s",
                timeout.as_secs()
            )));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    classify_exit(&name, output.status, stdout, stderr)
}

fn classify_exit(name: &str, status: ExitStatus, stdout: String, stderr: String) -> BackendResult {
    if status.success() {
        info!(program = name, "print command completed");
        return Ok(if stdout.is_empty() {
            format!("{name} completed")
        } else {
            stdout
        });
    }

    let detail = if stderr.is_empty() { stdout } else { stderr };
    let message = if detail.is_empty() {
        format!("{name} exited with {status}")
    } else {
        format!("{name} exited with {status}: {detail}")
    };

    // The program started, so only the shell's own "no such command" codes
    // mean the mechanism is missing. Output text is never inspected.
    match status.code() {
        Some(EXIT_COMMAND_NOT_FOUND) | Some(EXIT_CMD_NOT_RECOGNIZED) => {
            Err(BackendError::Unavailable(message))
        }
        _ => Err(BackendError::JobFailed(message)),
    }
}

/// First directory on `PATH` that contains one of `names`.
pub fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[tokio::test]
    async fn successful_command_returns_stdout() {
        let result = run_print_command(OsStr::new("sh"), &sh("echo queued"), Duration::from_secs(5)).await;
        assert_eq!(result, Ok("queued".to_string()));
    }

    #[tokio::test]
    async fn silent_success_is_summarised() {
        let result = run_print_command(OsStr::new("sh"), &sh("true"), Duration::from_secs(5)).await;
        assert_eq!(result, Ok("sh completed".to_string()));
    }

    #[tokio::test]
    async fn missing_executable_is_unavailable() {
        let result = run_print_command(
            OsStr::new("labelwerk-no-such-printer-binary"),
            &[],
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(BackendError::Unavailable(_))));
    }

    #[tokio::test]
    async fn non_zero_exit_is_a_job_failure() {
        let result = run_print_command(
            OsStr::new("sh"),
            &sh("echo 'printer jammed' >&2; exit 3"),
            Duration::from_secs(5),
        )
        .await;
        match result {
            Err(BackendError::JobFailed(message)) => assert!(message.contains("printer jammed")),
            other => panic!("expected job failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_text_from_a_running_program_is_a_job_failure() {
        for script in [
            "echo 'lp: Error - printer Zebra not found' >&2; exit 1",
            "echo 'cannot open /tmp/x.pdf: No such file or directory' >&2; exit 1",
        ] {
            let result = run_print_command(OsStr::new("sh"), &sh(script), Duration::from_secs(5)).await;
            match result {
                Err(BackendError::JobFailed(message)) => assert!(message.contains("exit status: 1")),
                other => panic!("expected job failure for {script:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn shell_command_not_found_is_unavailable() {
        let result = run_print_command(OsStr::new("sh"), &sh("exit 127"), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(BackendError::Unavailable(_))));
    }

    #[tokio::test]
    async fn timeout_is_a_job_failure() {
        let result = run_print_command(OsStr::new("sh"), &sh("sleep 5"), Duration::from_millis(100)).await;
        match result {
            Err(BackendError::JobFailed(message)) => assert!(message.contains("timed out")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
    }

    #[test]
    fn finds_sh_on_path() {
        assert!(find_on_path(&["sh"]).is_some());
        assert!(find_on_path(&["labelwerk-no-such-printer-binary"]).is_none());
    }
}
