//! # store::file
//!
//! JSON-array file primitives shared by the ledger and the logs.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Read a JSON array from `path`. Missing or corrupt files yield an empty
/// list — the caller keeps serving with fresh state.
pub(super) fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(error) => {
            warn!(path = %path.display(), %error, "store file unreadable — starting empty");
            Vec::new()
        }
    }
}

/// Rewrite `path` wholesale. Writes are atomic: serialize to `<path>.tmp`,
/// then rename into place.
pub(super) fn persist<T: Serialize>(path: &Path, items: &[T]) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create store directory {}", dir.display()))?;
    }

    let tmp = path.with_extension("json.tmp");
    let body = serde_json::to_vec(items).context("serialize store contents")?;
    fs::write(&tmp, body).with_context(|| format!("write {}", tmp.display()))?;

    fs::rename(&tmp, path).map_err(|error| {
        // Clean up the temp file on rename failure
        let _ = fs::remove_file(&tmp);
        anyhow::Error::new(error).context(format!("atomic rename into {}", path.display()))
    })
}
