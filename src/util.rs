//! Filesystem helpers shared by the directory passes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::error::Result;

/// Whether a path names a hidden file (leading `.`).
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Regular, non-hidden files of `dir` in name order.
///
/// Every pass over a corpus directory goes through this listing, so the
/// tokenize, stem, build and frequency passes all see the same documents.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if is_hidden(&path) {
            debug!("ignoring hidden file {}", path.display());
        } else if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
