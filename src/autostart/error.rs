//! Error types for autostart registration.

use std::io;
use thiserror::Error;

/// Autostart registration error type.
#[derive(Debug, Error)]
pub enum AutostartError {
    /// Failed to resolve the path of the running executable.
    #[error("Failed to resolve executable path: {0}")]
    ExecutablePathResolution(String),

    /// Home directory not found.
    #[error("Failed to get home directory")]
    HomeDirectoryNotFound,

    /// User configuration directory not found.
    #[error("Failed to get config directory")]
    ConfigDirectoryNotFound,

    /// Failed to create directory.
    #[error("Failed to create directory: {0}")]
    DirectoryCreation(#[source] io::Error),

    /// Failed to write the autostart entry.
    #[error("Failed to write autostart entry: {0}")]
    EntryWrite(#[source] io::Error),

    /// Failed to remove the autostart entry.
    #[error("Failed to remove autostart entry: {0}")]
    EntryRemove(#[source] io::Error),

    /// Failed to set file permissions.
    #[error("Failed to set file permissions: {0}")]
    PermissionSet(#[source] io::Error),

    /// Failed to serialize plist.
    #[error("Failed to serialize plist: {0}")]
    PlistSerialize(#[source] plist::Error),

    /// Failed to convert plist to UTF-8 string.
    #[error("Failed to convert plist to UTF-8: {0}")]
    PlistUtf8(#[source] std::string::FromUtf8Error),

    /// Failed to open the `Run` registry key.
    #[error("Failed to open startup registry key (status {status})")]
    RegistryOpen { status: u32 },

    /// Failed to read the `Run` registry value.
    #[error("Failed to query startup registry value (status {status})")]
    RegistryQuery { status: u32 },

    /// Failed to write the `Run` registry value.
    #[error("Failed to set startup registry value (status {status})")]
    RegistrySet { status: u32 },

    /// Failed to delete the `Run` registry value.
    #[error("Failed to delete startup registry value (status {status})")]
    RegistryDelete { status: u32 },

    /// The command line does not fit in a registry value.
    #[error("Startup command is too large for the registry")]
    RegistryValueTooLarge,

    /// No autostart backend could be located on this system.
    #[error("Autostart unavailable: {0}")]
    Unavailable(String),
}

/// Result type for autostart operations.
pub type Result<T> = std::result::Result<T, AutostartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_executable_path() {
        let err = AutostartError::ExecutablePathResolution("gone".to_string());
        assert!(err.to_string().contains("executable path"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_error_display_home_directory_not_found() {
        let err = AutostartError::HomeDirectoryNotFound;
        assert!(err.to_string().contains("home directory"));
    }

    #[test]
    fn test_error_display_registry_status() {
        let err = AutostartError::RegistrySet { status: 5 };
        assert!(err.to_string().contains("startup registry"));
        assert!(err.to_string().contains("status 5"));
    }

    #[test]
    fn test_error_display_unavailable() {
        let err = AutostartError::Unavailable("Failed to get config directory".to_string());
        assert!(err.to_string().starts_with("Autostart unavailable"));
        assert!(err.to_string().contains("config directory"));
    }

    #[test]
    fn test_error_display_entry_write() {
        let err = AutostartError::EntryWrite(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(err.to_string().contains("autostart entry"));
    }
}
