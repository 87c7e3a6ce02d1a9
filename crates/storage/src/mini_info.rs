//! Mini-info store
//!
//! The mini-info is optional: callers check [`MiniInfoStore::exists`]
//! before reading, because [`MiniInfoStore::read`] fails on a missing file.

use crate::context::StorageContext;
use crate::layout::PathLayout;
use crate::persist;
use dumpstore_core::{DumpIdentifier, MiniInfo, StorageResult};
use std::sync::Arc;

/// Reads and writes [`MiniInfo`] documents
pub struct MiniInfoStore<L> {
    ctx: Arc<StorageContext<L>>,
}

impl<L: PathLayout> MiniInfoStore<L> {
    /// Create a store over a shared context
    pub fn new(ctx: Arc<StorageContext<L>>) -> Self {
        Self { ctx }
    }

    /// Whether a mini-info file exists
    pub fn exists(&self, id: &DumpIdentifier) -> bool {
        self.ctx.layout().mini_info_path(id).is_file()
    }

    /// Read the mini-info; `NotFound` if absent
    pub fn read(&self, id: &DumpIdentifier) -> StorageResult<MiniInfo> {
        persist::read_document(&self.ctx.layout().mini_info_path(id))
    }

    /// Write the mini-info in compact form
    pub fn write(&self, id: &DumpIdentifier, mini_info: &MiniInfo) -> StorageResult<()> {
        persist::write_compact(&self.ctx.layout().mini_info_path(id), mini_info)
    }
}
