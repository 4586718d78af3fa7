//! Settings persistence and autostart synchronization.
//!
//! [`SettingsStore`] owns the in-memory [`TimerConfig`], the path of the
//! settings record, and the autostart backend. Nothing here is fatal:
//! unreadable records fall back to defaults, failed writes and failed
//! autostart updates are logged and skipped.

pub mod error;
pub mod record;

use std::fs;
use std::path::{Path, PathBuf};

pub use error::{Result, SettingsError};
pub use record::{format_record, parse_record};

use crate::autostart::{self, AutostartRegistry};
use crate::types::{RejectedField, SettingsDraft, TimerConfig};

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Returns `<config dir>/pomotray/settings.ini`, or `./settings.ini` when
/// the platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pomotray").join(SETTINGS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}

/// Reads a settings record from `path`.
///
/// # Errors
/// Returns [`SettingsError::Read`] if the file cannot be read.
pub fn read_record(path: &Path) -> Result<TimerConfig> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_record(&text))
}

/// Writes a settings record to `path`, creating parent directories.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_record(path: &Path, config: &TimerConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SettingsError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, format_record(config)).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Loads and saves the timer configuration.
pub struct SettingsStore {
    path: PathBuf,
    registry: Box<dyn AutostartRegistry>,
    executable: Option<PathBuf>,
    current: TimerConfig,
}

impl SettingsStore {
    /// Creates a store holding default settings. Call [`load`](Self::load)
    /// to read the record.
    pub fn new(path: impl Into<PathBuf>, registry: Box<dyn AutostartRegistry>) -> Self {
        Self {
            path: path.into(),
            registry,
            executable: None,
            current: TimerConfig::default(),
        }
    }

    /// Overrides the executable registered for autostart. Defaults to the
    /// running binary.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Reads the persisted settings, falling back to defaults.
    pub fn load(&mut self) -> TimerConfig {
        self.current = match read_record(&self.path) {
            Ok(config) => {
                tracing::debug!(path = %self.path.display(), ?config, "settings loaded");
                config
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %self.path.display(), "no settings record, using defaults");
                TimerConfig::default()
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                TimerConfig::default()
            }
        };
        self.current
    }

    /// Validates and stores new settings, then syncs autostart.
    ///
    /// Non-positive durations are dropped and the previous value kept.
    /// Returns the configuration now in effect.
    pub fn save(&mut self, draft: SettingsDraft) -> TimerConfig {
        for field in self.current.apply(&draft) {
            match field {
                RejectedField::WorkMinutes(value) => {
                    tracing::warn!(value, "work duration must be positive, keeping previous")
                }
                RejectedField::RestMinutes(value) => {
                    tracing::warn!(value, "rest duration must be positive, keeping previous")
                }
            }
        }

        if let Err(e) = write_record(&self.path, &self.current) {
            tracing::warn!("{}", e);
        } else {
            tracing::info!(path = %self.path.display(), "settings saved");
        }

        self.sync_autostart();
        self.current
    }

    fn sync_autostart(&self) {
        let executable = self.resolve_executable();
        if let Err(e) = autostart::sync(
            self.registry.as_ref(),
            self.current.auto_start_enabled,
            executable.as_deref(),
        ) {
            tracing::warn!("Autostart update failed: {}", e);
        }
    }

    fn resolve_executable(&self) -> Option<PathBuf> {
        if let Some(ref executable) = self.executable {
            return Some(executable.clone());
        }
        match std::env::current_exe() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Failed to resolve executable path: {}", e);
                None
            }
        }
    }

    /// Returns the configuration in effect.
    pub fn current(&self) -> TimerConfig {
        self.current
    }

    /// Returns the settings record path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the autostart backend.
    pub fn registry(&self) -> &dyn AutostartRegistry {
        self.registry.as_ref()
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("autostart", &self.registry.location())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
