//! Per-dump metadata record and artifact types
//!
//! [`DumpMetainfo`] is the record persisted next to every dump. It lists the
//! files registered for the dump as [`ArtifactEntry`] values. The runtime
//! projection of a file found on disk is [`ArtifactView`], which is never
//! persisted.
//!
//! ## On-disk shape
//!
//! ```json
//! {
//!   "BundleId": "b1",
//!   "DumpId": "d1",
//!   "DumpFileName": "b1/crash.dmp",
//!   "Status": "Finished",
//!   "Created": "2024-03-01T10:00:00Z",
//!   "PlannedDeletionDate": "2024-03-31T10:00:00Z",
//!   "Files": [{ "FileName": "crash.dmp", "Kind": "PrimaryDump" }]
//! }
//! ```

use crate::types::{BundleId, DumpId, DumpIdentifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// DumpStatus
// =============================================================================

/// Lifecycle status of a dump
///
/// The set is open: values written by newer components are kept verbatim
/// in [`DumpStatus::Other`] so a read-modify-write does not lose them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DumpStatus {
    /// Directory exists, analysis not started
    #[default]
    Created,
    /// Analysis in progress
    Analyzing,
    /// Analysis produced a result
    Finished,
    /// Analysis failed or no result could be found
    Failed,
    /// Status written by another component
    Other(String),
}

impl DumpStatus {
    /// Name used on disk
    pub fn as_str(&self) -> &str {
        match self {
            DumpStatus::Created => "Created",
            DumpStatus::Analyzing => "Analyzing",
            DumpStatus::Finished => "Finished",
            DumpStatus::Failed => "Failed",
            DumpStatus::Other(s) => s,
        }
    }
}

impl From<String> for DumpStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Created" => DumpStatus::Created,
            "Analyzing" => DumpStatus::Analyzing,
            "Finished" => DumpStatus::Finished,
            "Failed" => DumpStatus::Failed,
            _ => DumpStatus::Other(s),
        }
    }
}

impl From<DumpStatus> for String {
    fn from(status: DumpStatus) -> Self {
        match status {
            DumpStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DumpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Artifacts
// =============================================================================

/// Classified kind of a file in a dump directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// The crash-dump binary itself
    PrimaryDump,
    /// Files generated by the store (result, metadata, mini-info, relationships)
    SuperDumpMetaData,
    /// Other generated JSON data
    SuperDumpData,
    /// Analysis log files
    SuperDumpLogfile,
    /// Debugger session log
    WinDbgLog,
    /// Library archive uploaded with a Linux core
    LinuxLibraries,
    /// Anything else
    #[serde(other)]
    Other,
}

/// A file registered for a dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtifactEntry {
    /// File name relative to the dump directory
    pub file_name: String,
    /// Classified kind
    #[serde(alias = "Type")]
    pub kind: ArtifactKind,
}

impl ArtifactEntry {
    /// Create an entry
    pub fn new(file_name: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
        }
    }
}

/// Live view of one file in a dump directory
///
/// Recomputed on every listing; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactView {
    /// Registered or heuristically classified entry
    pub entry: ArtifactEntry,
    /// Absolute path of the file
    pub path: PathBuf,
    /// Size at the time of the scan
    pub size_in_bytes: u64,
    /// Whether the file may be handed out to callers
    pub downloadable: bool,
}

// =============================================================================
// DumpMetainfo
// =============================================================================

/// Persistent record describing one dump
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DumpMetainfo {
    /// Owning bundle
    pub bundle_id: BundleId,
    /// Dump within the bundle
    pub dump_id: DumpId,
    /// Path of the uploaded dump relative to the uploads root
    pub dump_file_name: Option<String>,
    /// Lifecycle status
    pub status: DumpStatus,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Time the analysis finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<DateTime<Utc>>,
    /// Failure description for failed analyses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// When retention makes the dump eligible for deletion
    pub planned_deletion_date: Option<DateTime<Utc>>,
    /// Registered files, in registration order
    pub files: Vec<ArtifactEntry>,
    /// Derived from disk on every read
    #[serde(skip)]
    pub is_primary_dump_available: bool,
}

impl DumpMetainfo {
    /// Empty record for an identifier
    pub fn new(id: &DumpIdentifier) -> Self {
        Self {
            bundle_id: id.bundle_id.clone(),
            dump_id: id.dump_id.clone(),
            ..Default::default()
        }
    }

    /// Identifier of the dump this record describes
    pub fn id(&self) -> DumpIdentifier {
        DumpIdentifier {
            bundle_id: self.bundle_id.clone(),
            dump_id: self.dump_id.clone(),
        }
    }

    /// First registered entry with the given file name
    ///
    /// Duplicate registrations exist in older records; the first one wins.
    pub fn find_file(&self, file_name: &str) -> Option<&ArtifactEntry> {
        self.files.iter().find(|e| e.file_name == file_name)
    }

    /// Register a file
    pub fn add_file(&mut self, entry: ArtifactEntry) {
        self.files.push(entry);
    }
}
