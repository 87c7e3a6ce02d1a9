//! Identifier types for bundles and dumps
//!
//! This module defines the keys used by every storage operation:
//! - [`BundleId`]: A collection of dumps uploaded together
//! - [`DumpId`]: One dump within a bundle
//! - [`DumpIdentifier`]: The (bundle, dump) pair addressing one dump

use serde::{Deserialize, Serialize};

/// Identifier of a bundle
///
/// A bundle is one directory under the data root. The identifier is the
/// directory name, so it is kept as an opaque string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(String);

impl BundleId {
    /// Create a bundle identifier
    pub fn new(id: impl Into<String>) -> Self {
        BundleId(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a dump, unique within its bundle
///
/// Like [`BundleId`], this is the name of the dump's directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DumpId(String);

impl DumpId {
    /// Create a dump identifier
    pub fn new(id: impl Into<String>) -> Self {
        DumpId(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DumpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable (bundle, dump) pair
///
/// Uniquely addresses one dump within one bundle and is the key for all
/// storage operations.
///
/// # Examples
///
/// ```
/// use dumpstore_core::types::DumpIdentifier;
///
/// let id = DumpIdentifier::new("bundle-1", "dump-a");
/// assert_eq!(id.bundle_id.as_str(), "bundle-1");
/// assert_eq!(id.to_string(), "bundle-1:dump-a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DumpIdentifier {
    /// Owning bundle
    pub bundle_id: BundleId,
    /// Dump within the bundle
    pub dump_id: DumpId,
}

impl DumpIdentifier {
    /// Create an identifier from raw bundle and dump ids
    pub fn new(bundle_id: impl Into<String>, dump_id: impl Into<String>) -> Self {
        Self {
            bundle_id: BundleId::new(bundle_id),
            dump_id: DumpId::new(dump_id),
        }
    }

    /// Create an identifier for a dump inside an already-known bundle
    pub fn in_bundle(bundle_id: &BundleId, dump_id: impl Into<String>) -> Self {
        Self {
            bundle_id: bundle_id.clone(),
            dump_id: DumpId::new(dump_id),
        }
    }
}

impl std::fmt::Display for DumpIdentifier {
    /// Display in the format: bundle_id:dump_id
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.bundle_id, self.dump_id)
    }
}
