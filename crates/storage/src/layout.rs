//! Filesystem layout of bundles and dumps
//!
//! Every path the storage layer touches comes from a [`PathLayout`]. The
//! default [`DirectoryLayout`] places one directory per bundle under the
//! data root and one directory per dump inside it:
//!
//! ```text
//! <data_dir>/<bundle_id>/<dump_id>/
//!     dumpinfo.json             metadata record
//!     superdump-result.json     analysis result
//!     <dump_id>.json            analysis result, legacy location
//!     miniinfo.json             mini-info
//!     relationships.json        relationships
//! ```

use dumpstore_core::{BundleId, DumpIdentifier, StorageSettings};
use std::path::{Path, PathBuf};

/// File name of the metadata record
pub const METADATA_FILE: &str = "dumpinfo.json";
/// File name of the analysis result
pub const RESULT_FILE: &str = "superdump-result.json";
/// File name of the mini-info
pub const MINI_INFO_FILE: &str = "miniinfo.json";
/// File name of the relationships file
pub const RELATIONSHIPS_FILE: &str = "relationships.json";

/// Resolves logical dump paths
///
/// Implementations must be pure: the same identifier always maps to the
/// same paths.
pub trait PathLayout: Send + Sync {
    /// Directory holding all dumps of a bundle
    fn bundle_directory(&self, bundle_id: &BundleId) -> PathBuf;

    /// Directory of one dump
    fn dump_directory(&self, id: &DumpIdentifier) -> PathBuf;

    /// Metadata record of a dump
    fn metadata_path(&self, id: &DumpIdentifier) -> PathBuf;

    /// Canonical analysis result location
    fn result_path(&self, id: &DumpIdentifier) -> PathBuf;

    /// Analysis result location used by older versions
    fn result_fallback_path(&self, id: &DumpIdentifier) -> PathBuf;

    /// Mini-info of a dump
    fn mini_info_path(&self, id: &DumpIdentifier) -> PathBuf;

    /// Relationships file of a dump
    fn relationships_path(&self, id: &DumpIdentifier) -> PathBuf;

    /// Root that uploaded files were stored under
    fn uploads_dir(&self) -> &Path;
}

/// Default layout rooted at a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    data_dir: PathBuf,
    uploads_dir: PathBuf,
}

impl DirectoryLayout {
    /// Layout with explicit roots
    pub fn new(data_dir: impl Into<PathBuf>, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Layout from storage settings
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.data_dir, &settings.uploads_dir)
    }

    /// Data root
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl PathLayout for DirectoryLayout {
    fn bundle_directory(&self, bundle_id: &BundleId) -> PathBuf {
        self.data_dir.join(bundle_id.as_str())
    }

    fn dump_directory(&self, id: &DumpIdentifier) -> PathBuf {
        self.bundle_directory(&id.bundle_id).join(id.dump_id.as_str())
    }

    fn metadata_path(&self, id: &DumpIdentifier) -> PathBuf {
        self.dump_directory(id).join(METADATA_FILE)
    }

    fn result_path(&self, id: &DumpIdentifier) -> PathBuf {
        self.dump_directory(id).join(RESULT_FILE)
    }

    fn result_fallback_path(&self, id: &DumpIdentifier) -> PathBuf {
        self.dump_directory(id)
            .join(format!("{}.json", id.dump_id.as_str()))
    }

    fn mini_info_path(&self, id: &DumpIdentifier) -> PathBuf {
        self.dump_directory(id).join(MINI_INFO_FILE)
    }

    fn relationships_path(&self, id: &DumpIdentifier) -> PathBuf {
        self.dump_directory(id).join(RELATIONSHIPS_FILE)
    }

    fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}
