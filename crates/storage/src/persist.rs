//! JSON document persistence
//!
//! Each entity lives in its own file; there is no cross-file transaction.
//! Pretty documents are written to a temporary sibling and renamed over the
//! target, so readers see either the old or the new file, never a torn one.
//! Concurrent writers to the same file are not serialized: the last rename
//! wins. Every write gets its own temporary file, so concurrent writers
//! never share a half-written one.

use dumpstore_core::{StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Result of a best-effort write
///
/// Best-effort writes never return `Err`; the failure is logged and handed
/// back here so callers and tests can still observe it.
#[derive(Debug)]
#[must_use]
pub enum WriteOutcome {
    /// Document was persisted
    Written,
    /// Nothing needed to be written
    Skipped,
    /// Write failed and was swallowed
    Failed(StorageError),
}

impl WriteOutcome {
    /// Whether the document is now on disk
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }

    /// Whether the write failed
    pub fn is_failed(&self) -> bool {
        matches!(self, WriteOutcome::Failed(_))
    }

    /// Convert a fallible write into an outcome
    pub fn from_result(result: StorageResult<()>) -> Self {
        match result {
            Ok(()) => WriteOutcome::Written,
            Err(e) => WriteOutcome::Failed(e),
        }
    }
}

/// Read and decode a JSON document
///
/// A missing file is [`StorageError::NotFound`]; a decode failure is
/// [`StorageError::Malformed`] naming the file.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let text = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| StorageError::malformed(path, e))
}

/// Write an indented document, replacing the target in one rename
pub fn write_pretty<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    replace_file(path, text.as_bytes())
}

/// Write a compact document
pub fn write_compact<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let text = serde_json::to_string(value)?;
    fs::write(path, text).map_err(|e| StorageError::io(path, e))
}

fn replace_file(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_sibling(path, dir).map_err(|e| StorageError::io(path, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StorageError::io(path, e))?;
    // a failed persist drops and removes the temp file
    tmp.persist(path).map_err(|e| StorageError::io(path, e.error))?;
    Ok(())
}

/// Unique `.<name>.<random>.tmp` next to `path`, one per write
fn temp_sibling(path: &Path, dir: &Path) -> std::io::Result<NamedTempFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)
}
