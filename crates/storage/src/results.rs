//! Analysis result repository
//!
//! Results live at the layout's canonical result path. Dumps analysed by
//! older versions have theirs at a fallback path instead; reads try the
//! canonical path first and the fallback second. Writes always target the
//! canonical path.

use crate::context::StorageContext;
use crate::layout::PathLayout;
use crate::persist::{self, WriteOutcome};
use dumpstore_core::{AnalysisResult, DumpIdentifier, StorageResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Reads and writes [`AnalysisResult`] documents
pub struct ResultRepository<L> {
    ctx: Arc<StorageContext<L>>,
}

impl<L: PathLayout> ResultRepository<L> {
    /// Create a repository over a shared context
    pub fn new(ctx: Arc<StorageContext<L>>) -> Self {
        Self { ctx }
    }

    /// Existing result file for a dump, canonical location first
    pub fn locate(&self, id: &DumpIdentifier) -> Option<PathBuf> {
        let layout = self.ctx.layout();
        [layout.result_path(id), layout.result_fallback_path(id)]
            .into_iter()
            .find(|p| p.is_file())
    }

    /// Read the result, turning every failure into `None`
    ///
    /// Decode and I/O failures are logged.
    pub fn read(&self, id: &DumpIdentifier) -> Option<AnalysisResult> {
        match self.read_strict(id) {
            Ok(result) => result,
            Err(e) => {
                warn!(dump = %id, error = %e, "Ignoring unreadable analysis result");
                None
            }
        }
    }

    /// Read the result, surfacing decode and I/O failures
    ///
    /// Returns `Ok(None)` when neither location has a file.
    pub fn read_strict(&self, id: &DumpIdentifier) -> StorageResult<Option<AnalysisResult>> {
        match self.locate(id) {
            Some(path) => persist::read_document(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Persist the result at the canonical location
    ///
    /// Best effort: failures are logged and returned, never raised.
    pub fn write(&self, id: &DumpIdentifier, result: &AnalysisResult) -> WriteOutcome {
        let path = self.ctx.layout().result_path(id);
        let outcome = WriteOutcome::from_result(persist::write_pretty(&path, result));
        if let WriteOutcome::Failed(ref e) = outcome {
            warn!(dump = %id, error = %e, "Could not write analysis result");
        }
        outcome
    }
}
