//! Storage layer for dumpstore
//!
//! This crate keeps per-dump metadata in step with the files on disk:
//! - DumpStorage: facade over all operations
//! - MetadataRepository: records, compat synthesis, retention backfill
//! - ResultRepository / MiniInfoStore: result and mini-info documents
//! - DirectoryMaterializer: live classified view of a dump directory
//! - SecureFileAccessor: gatekeeper for single-file access
//! - classify: the ordered file classification rules
//!
//! The filesystem is the database. There are no transactions and no
//! in-process locks; each entity is one file.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod classify;
pub mod context;
pub mod dump_storage;
pub mod layout;
pub mod materialize;
pub mod metadata;
pub mod mini_info;
pub mod persist;
pub mod results;

pub use access::{DumpFile, SecureFileAccessor};
pub use classify::{classify, FileClassifier};
pub use context::StorageContext;
pub use dump_storage::DumpStorage;
pub use layout::{DirectoryLayout, PathLayout};
pub use materialize::{ArtifactIter, DirectoryMaterializer};
pub use metadata::MetadataRepository;
pub use mini_info::MiniInfoStore;
pub use persist::WriteOutcome;
pub use results::ResultRepository;
