// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output directory handling and label file naming.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use labelwerk_core::error::{LabelwerkError, Result};

/// Create the output directory if needed and return its absolute path.
pub fn prepare_output_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.canonicalize()?)
}

/// `label_<size>_<YYYYmmdd-HHMMSS-ffffff>.pdf`
pub fn label_filename(label_size: &str, at: DateTime<Utc>) -> String {
    format!("label_{label_size}_{}.pdf", at.format("%Y%m%d-%H%M%S-%6f"))
}

/// Resolve a client-supplied file name inside `dir`.
///
/// Only bare file names are accepted; anything that could walk out of the
/// output directory is reported as not found.
pub fn resolve_label_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let bare = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..");
    if !bare {
        return Err(LabelwerkError::FileNotFound(name.to_string()));
    }

    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LabelwerkError::FileNotFound(name.to_string()))
    }
}
