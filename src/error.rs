//! Unified error types for dumpstore.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use dumpstore_core::{ConfigError, StorageError};
use thiserror::Error;

/// All dumpstore errors.
///
/// "Forbidden" and "absent" are separate variants and are never merged.
#[derive(Debug, Error)]
pub enum Error {
    /// Bundle, dump or file not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Access refused by the security boundary
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Dump directory already exists
    #[error("conflict: {0}")]
    Conflict(String),

    /// Stored document could not be decoded
    #[error("malformed: {0}")]
    Malformed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[source] StorageError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid or unreadable settings
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for dumpstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if access was refused.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}

// Convert from internal storage errors
impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { what } => Error::NotFound(what),
            StorageError::Unauthorized { reason } => Error::Unauthorized(reason),
            e @ StorageError::Conflict { .. } => Error::Conflict(e.to_string()),
            e @ StorageError::Malformed { .. } => Error::Malformed(e.to_string()),
            e @ StorageError::Io { .. } => Error::Io(e),
            StorageError::Serialization(msg) => Error::Serialization(msg),
        }
    }
}
