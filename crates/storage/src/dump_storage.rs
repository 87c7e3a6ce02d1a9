//! DumpStorage: the full operation surface over one data directory
//!
//! ## Design: STATELESS FACADE
//!
//! DumpStorage holds the shared [`StorageContext`] and the components built
//! on it. No caches, no locks: every call goes to the filesystem.
//!
//! ## Concurrency
//!
//! Operations on different dumps are independent. Operations on the same
//! dump are not serialized; metadata writes are last-writer-wins. The only
//! fail-closed operation is [`DumpStorage::create_dump_directory`].

use crate::access::{DumpFile, SecureFileAccessor};
use crate::context::StorageContext;
use crate::layout::PathLayout;
use crate::materialize::{ArtifactIter, DirectoryMaterializer};
use crate::metadata::MetadataRepository;
use crate::mini_info::MiniInfoStore;
use crate::persist::WriteOutcome;
use crate::results::ResultRepository;
use dumpstore_core::{
    AnalysisResult, BundleId, DumpIdentifier, DumpMetainfo, MiniInfo, StorageError,
    StorageResult, StorageSettings,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Filesystem-backed dump storage
pub struct DumpStorage<L> {
    ctx: Arc<StorageContext<L>>,
    metadata: MetadataRepository<L>,
    results: ResultRepository<L>,
    mini_infos: MiniInfoStore<L>,
    materializer: DirectoryMaterializer<L>,
    accessor: SecureFileAccessor<L>,
}

impl<L: PathLayout> DumpStorage<L> {
    /// Create storage for a layout and settings
    pub fn new(layout: L, settings: StorageSettings) -> Self {
        let ctx = Arc::new(StorageContext::new(layout, settings));
        Self {
            metadata: MetadataRepository::new(Arc::clone(&ctx)),
            results: ResultRepository::new(Arc::clone(&ctx)),
            mini_infos: MiniInfoStore::new(Arc::clone(&ctx)),
            materializer: DirectoryMaterializer::new(Arc::clone(&ctx)),
            accessor: SecureFileAccessor::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// Path layout
    pub fn layout(&self) -> &L {
        self.ctx.layout()
    }

    /// Storage settings
    pub fn settings(&self) -> &StorageSettings {
        self.ctx.settings()
    }

    /// Metadata repository, including the compat operations
    pub fn metadata(&self) -> &MetadataRepository<L> {
        &self.metadata
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Records of every dump in a bundle
    pub fn list_for_bundle(&self, bundle_id: &BundleId) -> StorageResult<Vec<DumpMetainfo>> {
        self.metadata.list_for_bundle(bundle_id)
    }

    /// Read a dump's record
    pub fn read_metainfo(&self, id: &DumpIdentifier) -> StorageResult<DumpMetainfo> {
        self.metadata.read(id)
    }

    /// Overwrite a dump's record
    pub fn store_metainfo(&self, info: &DumpMetainfo) -> StorageResult<()> {
        self.metadata.write(info)
    }

    // =========================================================================
    // Mini-info
    // =========================================================================

    /// Whether a mini-info exists
    pub fn mini_info_exists(&self, id: &DumpIdentifier) -> bool {
        self.mini_infos.exists(id)
    }

    /// Read the mini-info; `NotFound` if absent
    pub fn read_mini_info(&self, id: &DumpIdentifier) -> StorageResult<MiniInfo> {
        self.mini_infos.read(id)
    }

    /// Write the mini-info
    pub fn store_mini_info(&self, id: &DumpIdentifier, mini_info: &MiniInfo) -> StorageResult<()> {
        self.mini_infos.write(id, mini_info)
    }

    // =========================================================================
    // Analysis results
    // =========================================================================

    /// Read the result; any failure is logged and becomes `None`
    pub fn read_result(&self, id: &DumpIdentifier) -> Option<AnalysisResult> {
        self.results.read(id)
    }

    /// Read the result, surfacing failures
    pub fn read_result_strict(&self, id: &DumpIdentifier) -> StorageResult<Option<AnalysisResult>> {
        self.results.read_strict(id)
    }

    /// Write the result, best effort
    pub fn write_result(&self, id: &DumpIdentifier, result: &AnalysisResult) -> WriteOutcome {
        self.results.write(id, result)
    }

    // =========================================================================
    // Artifacts
    // =========================================================================

    /// Lazily list the classified files of a dump
    pub fn artifacts(&self, id: &DumpIdentifier) -> StorageResult<ArtifactIter> {
        let info = self.metadata.read(id)?;
        self.materializer.artifacts(&info)
    }

    /// Lazily list the classified files of a dump whose record is at hand
    pub fn artifacts_for(&self, info: &DumpMetainfo) -> StorageResult<ArtifactIter> {
        self.materializer.artifacts(info)
    }

    /// Absolute path of the primary dump, if present on disk
    pub fn primary_dump_path(&self, id: &DumpIdentifier) -> StorageResult<Option<PathBuf>> {
        let info = self.metadata.read(id)?;
        self.materializer.primary_dump_path(&info)
    }

    /// Absolute path of the primary dump for a record at hand
    pub fn primary_dump_path_for(&self, info: &DumpMetainfo) -> StorageResult<Option<PathBuf>> {
        self.materializer.primary_dump_path(info)
    }

    /// Access a named file, subject to the security checks
    pub fn get_file(
        &self,
        id: &DumpIdentifier,
        requested: &str,
    ) -> StorageResult<Option<DumpFile>> {
        self.accessor.get_file(id, requested)
    }

    // =========================================================================
    // Dump directories
    // =========================================================================

    /// Create the directory of a new dump
    ///
    /// Fails with `Conflict`, leaving it untouched, if it already exists.
    pub fn create_dump_directory(&self, id: &DumpIdentifier) -> StorageResult<PathBuf> {
        let dir = self.ctx.layout().dump_directory(id);
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        match fs::create_dir(&dir) {
            Ok(()) => {
                info!(dump = %id, path = %dir.display(), "Created dump directory");
                Ok(dir)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StorageError::Conflict { path: dir })
            }
            Err(e) => Err(StorageError::io(&dir, e)),
        }
    }

    /// Copy a file into the dump's directory under its own name
    ///
    /// `NotFound` naming the dump if its directory does not exist.
    pub fn add_file_copy(&self, id: &DumpIdentifier, source: &Path) -> StorageResult<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| StorageError::not_found(format!("file name of {}", source.display())))?;
        let dir = self.ctx.layout().dump_directory(id);
        if !dir.is_dir() {
            return Err(StorageError::not_found(format!("dump {}", id)));
        }
        let dest = dir.join(name);
        fs::copy(source, &dest).map_err(|e| StorageError::io(source, e))?;
        Ok(dest)
    }

    /// Delete the dump's primary artifact
    ///
    /// `NotFound` if no primary dump is on disk.
    pub fn delete_primary_dump(&self, id: &DumpIdentifier) -> StorageResult<()> {
        let path = self
            .primary_dump_path(id)?
            .ok_or_else(|| StorageError::not_found(format!("primary dump of {}", id)))?;
        fs::remove_file(&path).map_err(|e| StorageError::io(&path, e))?;
        info!(dump = %id, path = %path.display(), "Deleted primary dump");
        Ok(())
    }
}
