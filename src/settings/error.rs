//! Error types for settings persistence.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Settings persistence error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings record.
    #[error("Failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the settings record.
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to create the settings directory.
    #[error("Failed to create settings directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    /// Returns true if the record simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
