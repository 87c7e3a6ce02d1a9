//! Storage settings
//!
//! Settings are plain data deserialized from TOML:
//!
//! ```toml
//! data_dir = "/srv/superdump/data"
//! uploads_dir = "/srv/superdump/uploads"
//! dump_downloadable = false
//!
//! [retention]
//! enabled = true
//! days = 30
//! ```
//!
//! Every field has a default, so an empty document is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("cannot read settings {}: {source}", path.display())]
    Io {
        /// Settings file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings document is not valid TOML for [`StorageSettings`]
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings parsed but are inconsistent
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Retention policy settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionSettings {
    /// Whether planned deletion dates are backfilled
    pub enabled: bool,
    /// Days between creation and planned deletion
    pub days: u32,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            days: 30,
        }
    }
}

/// Settings consumed by the storage layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory holding one directory per bundle
    pub data_dir: PathBuf,
    /// Uploads root, stripped from legacy dump file names
    pub uploads_dir: PathBuf,
    /// Retention policy
    pub retention: RetentionSettings,
    /// Whether primary dump files may be downloaded
    pub dump_downloadable: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            uploads_dir: PathBuf::from("./uploads"),
            retention: RetentionSettings::default(),
            dump_downloadable: false,
        }
    }
}

impl StorageSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: StorageSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check settings for contradictions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.enabled && self.retention.days == 0 {
            return Err(ConfigError::Invalid(
                "retention is enabled but retention.days is 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether retention dates are maintained
    pub fn is_retention_enabled(&self) -> bool {
        self.retention.enabled
    }
}
