//! Convenient imports for dumpstore.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use dumpstore::prelude::*;
//!
//! let store = DumpStore::builder().data_dir("./data").open()?;
//! let dumps = store.list_for_bundle(&BundleId::new("bundle-1"))?;
//! ```

// Main entry point
pub use crate::store::{DumpStore, DumpStoreBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use dumpstore_core::{
    AnalysisResult, ArtifactEntry, ArtifactKind, ArtifactView, BundleId, DumpId,
    DumpIdentifier, DumpMetainfo, DumpStatus, MiniInfo, StorageSettings,
};

// Storage results
pub use dumpstore_storage::{DumpFile, WriteOutcome};
