//! One-shot cross-invocation query handoff.
//!
//! A zero-hit search writes its query here; the next chat view load reads
//! it and submits it exactly once. The contract is write-once,
//! read-and-clear-once: [`consume`] removes the file *before* handing the
//! query back, so a repeated chat load (or a crash mid-consume) can never
//! replay the same query.

use anyhow::{Context, Result};
use std::path::Path;

/// Persist `query` as the pending handoff, replacing any previous one.
pub fn store(path: &Path, query: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create handoff directory: {}", parent.display()))?;
    }
    std::fs::write(path, query)
        .with_context(|| format!("Failed to write handoff file: {}", path.display()))
}

/// Take the pending handoff query, if any. The file is cleared before the
/// query is returned; if clearing fails the query is dropped rather than
/// risk a duplicate send on a later load.
pub fn consume(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;

    if let Err(e) = std::fs::remove_file(path) {
        eprintln!(
            "warning: could not clear handoff file {}: {}",
            path.display(),
            e
        );
        return None;
    }

    let query = raw.trim().to_string();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}
