//! Autostart registration.
//!
//! Registers the timer to launch at user login using the platform's
//! native startup list:
//!
//! - macOS: per-user LaunchAgent plist
//! - Windows: `HKCU\...\CurrentVersion\Run` value
//! - Other Unix: XDG autostart desktop entry
//!
//! Every backend is idempotent: registering twice overwrites the entry, and
//! unregistering an absent entry succeeds.
//!
//! # Example
//!
//! ```no_run
//! use pomotray::autostart;
//!
//! let registry = autostart::platform_registry()?;
//! let exe = std::env::current_exe().unwrap();
//! autostart::sync(registry.as_ref(), true, Some(&exe))?;
//! # Ok::<(), autostart::AutostartError>(())
//! ```

pub mod error;
pub mod launchagent;
pub mod windows;
pub mod xdg;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub use error::{AutostartError, Result};
pub use launchagent::{LaunchAgentPlist, LaunchAgentRegistry};
pub use windows::{run_command, WindowsRunKey};
pub use xdg::XdgAutostart;

/// Human-readable application name.
pub const APP_NAME: &str = "Pomodoro Timer";

/// Value name used in the Windows `Run` key.
pub const REGISTRY_VALUE_NAME: &str = "PomodoroTimer";

/// OS startup-list integration, keyed by a fixed application identifier.
pub trait AutostartRegistry {
    /// Makes `executable` launch at login. Overwrites an existing entry.
    fn register(&self, executable: &Path) -> Result<()>;

    /// Removes the login entry. Succeeds when there is nothing to remove.
    fn unregister(&self) -> Result<()>;

    /// Returns true if a login entry currently exists.
    fn is_registered(&self) -> bool;

    /// Describes where the entry lives, for display.
    fn location(&self) -> String;
}

/// Returns the registry for the current platform.
///
/// # Errors
/// Returns an error if the user's home or config directory is unknown.
pub fn platform_registry() -> Result<Box<dyn AutostartRegistry>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(LaunchAgentRegistry::new()?))
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(WindowsRunKey::new()))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Ok(Box::new(XdgAutostart::new()?))
    }
}

/// Brings the registration in line with `enabled`.
///
/// # Errors
/// Returns an error if the backend fails, or if `enabled` is set and no
/// executable path is available.
pub fn sync(
    registry: &dyn AutostartRegistry,
    enabled: bool,
    executable: Option<&Path>,
) -> Result<()> {
    if enabled {
        let executable = executable.ok_or_else(|| {
            AutostartError::ExecutablePathResolution("no executable path available".to_string())
        })?;
        registry.register(executable)
    } else {
        registry.unregister()
    }
}

/// Registry used when no platform backend could be located.
///
/// Registering reports [`AutostartError::Unavailable`] so the caller can
/// log it; unregistering succeeds because nothing can be registered.
#[derive(Debug, Clone)]
pub struct UnavailableAutostart {
    reason: String,
}

impl UnavailableAutostart {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the platform backend could not be used.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl AutostartRegistry for UnavailableAutostart {
    fn register(&self, _executable: &Path) -> Result<()> {
        Err(AutostartError::Unavailable(self.reason.clone()))
    }

    fn unregister(&self) -> Result<()> {
        tracing::debug!("autostart unavailable, nothing to remove");
        Ok(())
    }

    fn is_registered(&self) -> bool {
        false
    }

    fn location(&self) -> String {
        format!("unavailable ({})", self.reason)
    }
}

/// Returns the platform registry, or an [`UnavailableAutostart`] when it
/// cannot be located. Never fails.
pub fn platform_registry_or_unavailable() -> Box<dyn AutostartRegistry> {
    registry_or_unavailable(platform_registry())
}

/// Falls back to [`UnavailableAutostart`] on error, logging a warning.
pub fn registry_or_unavailable(
    registry: Result<Box<dyn AutostartRegistry>>,
) -> Box<dyn AutostartRegistry> {
    match registry {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!("Autostart disabled: {}", e);
            Box::new(UnavailableAutostart::new(e.to_string()))
        }
    }
}

/// In-memory registry for tests.
///
/// Records the registered executable and counts calls. Failures can be
/// injected with [`set_should_fail`](Self::set_should_fail).
#[derive(Debug, Default)]
pub struct MockAutostart {
    registered: Mutex<Option<PathBuf>>,
    register_calls: AtomicUsize,
    unregister_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAutostart {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `register`/`unregister` calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Returns the executable currently registered, if any.
    #[must_use]
    pub fn registered_path(&self) -> Option<PathBuf> {
        self.registered.lock().unwrap().clone()
    }

    /// Returns how many times `register` was called.
    #[must_use]
    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    /// Returns how many times `unregister` was called.
    #[must_use]
    pub fn unregister_calls(&self) -> usize {
        self.unregister_calls.load(Ordering::SeqCst)
    }
}

fn mock_failure() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock failure")
}

impl AutostartRegistry for MockAutostart {
    fn register(&self, executable: &Path) -> Result<()> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AutostartError::EntryWrite(mock_failure()));
        }
        *self.registered.lock().unwrap() = Some(executable.to_path_buf());
        Ok(())
    }

    fn unregister(&self) -> Result<()> {
        self.unregister_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AutostartError::EntryRemove(mock_failure()));
        }
        *self.registered.lock().unwrap() = None;
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.registered.lock().unwrap().is_some()
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

impl<T: AutostartRegistry + ?Sized> AutostartRegistry for std::sync::Arc<T> {
    fn register(&self, executable: &Path) -> Result<()> {
        (**self).register(executable)
    }

    fn unregister(&self) -> Result<()> {
        (**self).unregister()
    }

    fn is_registered(&self) -> bool {
        (**self).is_registered()
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
