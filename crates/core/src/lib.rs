//! Core types for dumpstore
//!
//! This crate defines the data model shared by the storage layer:
//! - [`types`]: Bundle and dump identifiers
//! - [`metainfo`]: Per-dump metadata record and artifact kinds
//! - [`result`]: Analysis result document with polymorphic substructures
//! - [`mini_info`]: Listing projection of the result
//! - [`retention`]: Planned deletion date calculation
//! - [`config`]: Storage settings
//! - [`error`]: Storage error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod metainfo;
pub mod mini_info;
pub mod result;
pub mod retention;
pub mod types;

pub use config::{ConfigError, RetentionSettings, StorageSettings};
pub use error::{StorageError, StorageResult};
pub use metainfo::{ArtifactEntry, ArtifactKind, ArtifactView, DumpMetainfo, DumpStatus};
pub use mini_info::MiniInfo;
pub use result::{AnalysisInfo, AnalysisResult};
pub use types::{BundleId, DumpId, DumpIdentifier};
