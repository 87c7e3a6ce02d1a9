//! Secure file access
//!
//! Gatekeeper for handing a single named file of a dump to a caller.
//! Checks run in a fixed order and stop at the first refusal:
//!
//! 1. the name contains no `..` component
//! 2. the resolved path lies inside the dump directory (canonical, by component)
//! 3. the file's kind is permitted by the download policy, judged by both
//!    the requested name and the name it resolves to
//! 4. the file exists
//!
//! Steps 1-3 fail with `Unauthorized`; step 3 refuses a forbidden primary
//! dump whether or not it exists. Only step 4 yields "not found", as
//! `Ok(None)`.

use crate::classify::FileClassifier;
use crate::context::StorageContext;
use crate::layout::PathLayout;
use crate::metadata::MetadataRepository;
use dumpstore_core::{ArtifactEntry, DumpIdentifier, StorageError, StorageResult};
use dumpstore_security::{has_traversal_token, resolve_contained};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// A file cleared for access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFile {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Classification of the file
    pub entry: ArtifactEntry,
    /// Size when access was granted
    pub size_in_bytes: u64,
}

impl DumpFile {
    /// Open the file for reading
    pub fn open(&self) -> StorageResult<File> {
        File::open(&self.path).map_err(|e| StorageError::io(&self.path, e))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Grants or refuses access to individual dump files
pub struct SecureFileAccessor<L> {
    ctx: Arc<StorageContext<L>>,
    metadata: MetadataRepository<L>,
}

impl<L: PathLayout> SecureFileAccessor<L> {
    /// Create an accessor over a shared context
    pub fn new(ctx: Arc<StorageContext<L>>) -> Self {
        Self {
            metadata: MetadataRepository::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// Resolve `requested` inside the dump's directory
    ///
    /// Returns `Err(Unauthorized)` for refused requests and `Ok(None)` when
    /// an allowed file does not exist.
    pub fn get_file(
        &self,
        id: &DumpIdentifier,
        requested: &str,
    ) -> StorageResult<Option<DumpFile>> {
        if has_traversal_token(requested) {
            warn!(dump = %id, requested, "Refusing path traversal");
            return Err(StorageError::unauthorized(format!(
                "'{}' contains a parent directory reference",
                requested
            )));
        }

        let dir = self.ctx.layout().dump_directory(id);
        if !dir.is_dir() {
            return Err(StorageError::not_found(format!("dump {}", id)));
        }

        let path = resolve_contained(&dir, requested).map_err(|e| {
            warn!(dump = %id, requested, reason = e.reason, "Refusing file outside dump directory");
            StorageError::unauthorized(e.to_string())
        })?;

        let info = self.metadata.read(id)?;
        let classifier = FileClassifier::for_dump(self.ctx.layout(), &info);
        let requested_name = file_name_of(Path::new(requested));
        let entry = classifier.classify(&requested_name);
        // a link may carry a harmless name for a primary dump, or the reverse
        let target = classifier.classify(&file_name_of(&path));

        let policy = self.ctx.policy();
        if !policy.permits(entry.kind) || !policy.permits(target.kind) {
            warn!(dump = %id, requested, "Refusing primary dump download");
            return Err(StorageError::unauthorized(format!(
                "downloading '{}' is disabled",
                requested
            )));
        }

        match std::fs::metadata(&path) {
            Ok(m) if m.is_file() => Ok(Some(DumpFile {
                path,
                entry,
                size_in_bytes: m.len(),
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }
}
