//! # dumpstore
//!
//! Filesystem-backed storage for crash-dump bundles.
//!
//! Each bundle is a directory and each dump a subdirectory holding the dump
//! itself, its analysis result, a metadata record and auxiliary files.
//! dumpstore keeps the metadata record synchronized with the files that are
//! actually on disk, migrating dumps that predate the record format, and
//! guards access to individual files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dumpstore::prelude::*;
//!
//! let store = DumpStore::builder()
//!     .data_dir("./data")
//!     .uploads_dir("./uploads")
//!     .open()?;
//!
//! let id = DumpIdentifier::new("bundle-1", "dump-1");
//! store.create_dump_directory(&id)?;
//!
//! // Classified view of everything in the dump directory
//! for artifact in store.artifacts(&id)? {
//!     let artifact = artifact?;
//!     println!("{} {:?}", artifact.entry.file_name, artifact.entry.kind);
//! }
//!
//! // Unauthorized for traversal or forbidden primary dumps
//! let file = store.get_file(&id, "windbg.log")?;
//! ```
//!
//! ## Crates
//!
//! - `dumpstore-core` - data model, retention, settings
//! - `dumpstore-security` - download policy, path containment
//! - `dumpstore-storage` - repositories over the filesystem

#![warn(missing_docs)]

mod error;
mod store;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use store::{DumpStore, DumpStoreBuilder};

// Re-export the data model
pub use dumpstore_core::{
    AnalysisResult, ArtifactEntry, ArtifactKind, ArtifactView, BundleId, DumpId, DumpIdentifier,
    DumpMetainfo, DumpStatus, MiniInfo, StorageSettings,
};

// Layers for callers needing more than the facade
pub use dumpstore_security as security;
pub use dumpstore_storage as storage;
