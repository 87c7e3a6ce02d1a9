//! Main entry point for dumpstore.
//!
//! This module provides the `DumpStore` struct, the primary entry point for
//! all dump storage operations.

use crate::error::Result;
use dumpstore_core::{
    AnalysisResult, BundleId, DumpIdentifier, DumpMetainfo, MiniInfo, StorageSettings,
};
use dumpstore_storage::{ArtifactIter, DirectoryLayout, DumpFile, DumpStorage, WriteOutcome};
use std::path::{Path, PathBuf};

/// Dump storage over a data directory.
///
/// Create a store using [`DumpStore::open`] or [`DumpStore::builder`].
///
/// # Example
///
/// ```ignore
/// use dumpstore::prelude::*;
///
/// let store = DumpStore::builder()
///     .data_dir("/srv/superdump/data")
///     .uploads_dir("/srv/superdump/uploads")
///     .retention_days(30)
///     .open()?;
///
/// for info in store.list_for_bundle(&BundleId::new("bundle-1"))? {
///     println!("{} {}", info.dump_id, info.status);
/// }
/// ```
pub struct DumpStore {
    inner: DumpStorage<DirectoryLayout>,
}

impl DumpStore {
    /// Open a store with settings loaded from a TOML file.
    pub fn open(settings_path: impl AsRef<Path>) -> Result<Self> {
        Self::builder()
            .settings(StorageSettings::load(settings_path)?)
            .open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> DumpStoreBuilder {
        DumpStoreBuilder::new()
    }

    /// Settings in effect.
    pub fn settings(&self) -> &StorageSettings {
        self.inner.settings()
    }

    /// The underlying storage.
    pub fn storage(&self) -> &DumpStorage<DirectoryLayout> {
        &self.inner
    }

    /// List the records of every dump in a bundle.
    ///
    /// Synthesizes records for dumps that predate the record format.
    pub fn list_for_bundle(&self, bundle_id: &BundleId) -> Result<Vec<DumpMetainfo>> {
        Ok(self.inner.list_for_bundle(bundle_id)?)
    }

    /// Read a dump's record.
    pub fn read_metainfo(&self, id: &DumpIdentifier) -> Result<DumpMetainfo> {
        Ok(self.inner.read_metainfo(id)?)
    }

    /// Overwrite a dump's record.
    pub fn store_metainfo(&self, info: &DumpMetainfo) -> Result<()> {
        Ok(self.inner.store_metainfo(info)?)
    }

    /// Whether a mini-info exists.
    pub fn mini_info_exists(&self, id: &DumpIdentifier) -> bool {
        self.inner.mini_info_exists(id)
    }

    /// Read the mini-info.
    pub fn read_mini_info(&self, id: &DumpIdentifier) -> Result<MiniInfo> {
        Ok(self.inner.read_mini_info(id)?)
    }

    /// Write the mini-info.
    pub fn store_mini_info(&self, id: &DumpIdentifier, mini_info: &MiniInfo) -> Result<()> {
        Ok(self.inner.store_mini_info(id, mini_info)?)
    }

    /// Read the analysis result; failures are logged and become `None`.
    pub fn read_result(&self, id: &DumpIdentifier) -> Option<AnalysisResult> {
        self.inner.read_result(id)
    }

    /// Read the analysis result, surfacing failures.
    pub fn read_result_strict(&self, id: &DumpIdentifier) -> Result<Option<AnalysisResult>> {
        Ok(self.inner.read_result_strict(id)?)
    }

    /// Write the analysis result, best effort.
    pub fn write_result(&self, id: &DumpIdentifier, result: &AnalysisResult) -> WriteOutcome {
        self.inner.write_result(id, result)
    }

    /// Absolute path of the primary dump, if on disk.
    pub fn primary_dump_path(&self, id: &DumpIdentifier) -> Result<Option<PathBuf>> {
        Ok(self.inner.primary_dump_path(id)?)
    }

    /// Create the directory of a new dump.
    pub fn create_dump_directory(&self, id: &DumpIdentifier) -> Result<PathBuf> {
        Ok(self.inner.create_dump_directory(id)?)
    }

    /// Copy a file into a dump's directory.
    pub fn add_file_copy(&self, id: &DumpIdentifier, source: &Path) -> Result<PathBuf> {
        Ok(self.inner.add_file_copy(id, source)?)
    }

    /// Delete a dump's primary artifact.
    pub fn delete_primary_dump(&self, id: &DumpIdentifier) -> Result<()> {
        Ok(self.inner.delete_primary_dump(id)?)
    }

    /// Lazily list the classified files of a dump.
    pub fn artifacts(&self, id: &DumpIdentifier) -> Result<ArtifactIter> {
        Ok(self.inner.artifacts(id)?)
    }

    /// Access a named file of a dump.
    ///
    /// `Err(Unauthorized)` if refused, `Ok(None)` if allowed but absent.
    pub fn get_file(&self, id: &DumpIdentifier, requested: &str) -> Result<Option<DumpFile>> {
        Ok(self.inner.get_file(id, requested)?)
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// // Downloads allowed, retention of two weeks
/// let store = DumpStore::builder()
///     .data_dir("./data")
///     .dump_downloadable(true)
///     .retention_days(14)
///     .open()?;
/// ```
pub struct DumpStoreBuilder {
    settings: StorageSettings,
}

impl DumpStoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: StorageSettings::default(),
        }
    }

    /// Replace all settings.
    pub fn settings(mut self, settings: StorageSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the data directory holding the bundles.
    pub fn data_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.settings.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the uploads root used to relativize legacy dump file names.
    pub fn uploads_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.settings.uploads_dir = path.as_ref().to_path_buf();
        self
    }

    /// Enable retention with the given number of days.
    pub fn retention_days(mut self, days: u32) -> Self {
        self.settings.retention.enabled = true;
        self.settings.retention.days = days;
        self
    }

    /// Allow or forbid downloading primary dumps.
    pub fn dump_downloadable(mut self, downloadable: bool) -> Self {
        self.settings.dump_downloadable = downloadable;
        self
    }

    /// Validate the settings and open the store.
    pub fn open(self) -> Result<DumpStore> {
        self.settings.validate()?;
        let layout = DirectoryLayout::from_settings(&self.settings);
        Ok(DumpStore {
            inner: DumpStorage::new(layout, self.settings),
        })
    }
}

impl Default for DumpStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
