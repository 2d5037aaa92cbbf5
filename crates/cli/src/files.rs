// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{Result, eyre::Context};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text: String =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "Read input file");
    serde_json::from_str(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

/// Writes through a sibling temporary file so a failed write never leaves a
/// truncated ledger behind.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json: String = serde_json::to_string_pretty(value)?;
    let staging: PathBuf = path.with_extension("json.tmp");
    fs::write(&staging, json)
        .wrap_err_with(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path).wrap_err_with(|| format!("Failed to replace {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
