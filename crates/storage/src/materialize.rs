//! Directory materializer
//!
//! Produces the authoritative view of a dump's files by scanning its
//! directory. The scan, not the registered file list, decides what exists:
//! unregistered files are included and registered-but-deleted files are
//! not. Registrations only contribute the classification.
//!
//! Nothing is cached. Every call re-reads the directory.

use crate::classify::FileClassifier;
use crate::context::StorageContext;
use crate::layout::PathLayout;
use dumpstore_core::{
    ArtifactKind, ArtifactView, DumpMetainfo, StorageError, StorageResult,
};
use dumpstore_security::DownloadPolicy;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds [`ArtifactView`]s for dump directories
pub struct DirectoryMaterializer<L> {
    ctx: Arc<StorageContext<L>>,
}

impl<L: PathLayout> DirectoryMaterializer<L> {
    /// Create a materializer over a shared context
    pub fn new(ctx: Arc<StorageContext<L>>) -> Self {
        Self { ctx }
    }

    /// Lazily list every file in the dump's directory
    ///
    /// Fails with `NotFound` if the dump directory does not exist.
    pub fn artifacts(&self, info: &DumpMetainfo) -> StorageResult<ArtifactIter> {
        let layout = self.ctx.layout();
        let dir = layout.dump_directory(&info.id());
        let entries = fs::read_dir(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(ArtifactIter {
            entries,
            dir,
            classifier: FileClassifier::for_dump(layout, info),
            policy: self.ctx.policy(),
        })
    }

    /// Absolute path of the dump's primary artifact, if it is on disk
    ///
    /// Takes the first file classified as [`ArtifactKind::PrimaryDump`].
    pub fn primary_dump_path(&self, info: &DumpMetainfo) -> StorageResult<Option<PathBuf>> {
        for view in self.artifacts(info)? {
            let view = view?;
            if view.entry.kind == ArtifactKind::PrimaryDump {
                // the file may have been removed since the scan
                return Ok(view.path.is_file().then_some(view.path));
            }
        }
        Ok(None)
    }
}

/// Lazy iterator over the files of one dump directory
///
/// Yields one item per regular file visited. Subdirectories are skipped, as
/// are files that vanish between listing and inspection.
#[derive(Debug)]
pub struct ArtifactIter {
    entries: fs::ReadDir,
    dir: PathBuf,
    classifier: FileClassifier,
    policy: DownloadPolicy,
}

impl ArtifactIter {
    fn view(&self, path: PathBuf) -> Option<StorageResult<ArtifactView>> {
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => return Some(Err(StorageError::io(&path, e))),
        };
        if !metadata.is_file() {
            return None;
        }
        let name = path.file_name()?.to_string_lossy().into_owned();
        let entry = self.classifier.classify(&name);
        let downloadable = self.policy.permits(entry.kind);
        Some(Ok(ArtifactView {
            entry,
            path,
            size_in_bytes: metadata.len(),
            downloadable,
        }))
    }
}

impl Iterator for ArtifactIter {
    type Item = StorageResult<ArtifactView>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(StorageError::io(&self.dir, e))),
            };
            if let Some(item) = self.view(entry.path()) {
                return Some(item);
            }
        }
    }
}
