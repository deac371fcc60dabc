// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::Books;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.cropledger", "Cropledger", "cropledger"));

pub fn books_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("books.json"))
}

/// Loads the books file, or starts a fresh default set when none exists
/// yet. Deleting the file is the supported way to start over.
pub fn load_or_init(path: &Path) -> Result<Books> {
    if path.exists() {
        load(path)
    } else {
        Ok(Books::default())
    }
}

pub fn load(path: &Path) -> Result<Books> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Read books at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse books at {}", path.display()))
}

/// Write-then-rename so an interrupted write leaves the old file intact.
pub fn save(path: &Path, books: &Books) -> Result<()> {
    let raw = serde_json::to_string_pretty(books).context("Serialize books")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw).with_context(|| format!("Write books at {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Replace books at {}", path.display()))?;
    Ok(())
}
