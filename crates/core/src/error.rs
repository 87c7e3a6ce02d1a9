//! Error types for dump storage
//!
//! Every storage operation returns [`StorageResult`]. The variants follow
//! the storage error taxonomy:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | NotFound | Bundle/dump directory, metadata or mini-info file absent |
//! | Malformed | A stored document fails to decode |
//! | Unauthorized | Traversal, containment escape, forbidden primary dump |
//! | Conflict | Dump directory already exists on create |
//! | Io | Any other filesystem failure |
//!
//! `Unauthorized` is never folded into `NotFound`; callers must be able to
//! tell "forbidden" from "absent".

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by dump storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Directory or file does not exist
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing entity
        what: String,
    },

    /// Stored document could not be decoded
    #[error("could not deserialize {}: {message}", path.display())]
    Malformed {
        /// File that failed to decode
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// Access refused by the security boundary
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why access was refused
        reason: String,
    },

    /// Target already exists
    #[error("cannot create '{}': it already exists", path.display())]
    Conflict {
        /// Existing path
        path: PathBuf,
    },

    /// Filesystem failure with path context
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Not-found error for a described entity
    pub fn not_found(what: impl Into<String>) -> Self {
        StorageError::NotFound { what: what.into() }
    }

    /// Unauthorized error with a reason
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        StorageError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Decode failure for a file
    pub fn malformed(path: &Path, message: impl std::fmt::Display) -> Self {
        StorageError::Malformed {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Wrap an I/O error, turning `ErrorKind::NotFound` into [`StorageError::NotFound`]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return StorageError::not_found(path.display().to_string());
        }
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// Check if access was refused
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StorageError::Unauthorized { .. })
    }

    /// Check if this is a create conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict { .. })
    }

    /// Check if a stored document failed to decode
    pub fn is_malformed(&self) -> bool {
        matches!(self, StorageError::Malformed { .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}
