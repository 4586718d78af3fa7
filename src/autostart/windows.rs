//! Windows `Run` key backend.
//!
//! Registration stores `"<exe>" run` as a `REG_SZ` value under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`, using the Win32
//! registry API. A missing value counts as "not registered".

use std::path::Path;

use super::REGISTRY_VALUE_NAME;

/// Per-user startup key, relative to `HKEY_CURRENT_USER`.
pub const RUN_SUBKEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Registers the timer in the current user's `Run` key.
#[derive(Debug, Clone, Default)]
pub struct WindowsRunKey;

impl WindowsRunKey {
    pub fn new() -> Self {
        Self
    }

    /// Describes the registry value, e.g. `HKCU\...\Run\PomodoroTimer`.
    pub fn value_path() -> String {
        format!(r"HKCU\{}\{}", RUN_SUBKEY, REGISTRY_VALUE_NAME)
    }
}

/// Command line stored in the `Run` value.
pub fn run_command(executable: &Path) -> String {
    format!("\"{}\" run", executable.display())
}

/// Encodes `s` as a NUL-terminated UTF-16 string.
#[cfg(any(target_os = "windows", test))]
fn wide_null(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(target_os = "windows")]
mod registry {
    use windows_sys::Win32::Foundation::ERROR_FILE_NOT_FOUND;
    use windows_sys::Win32::System::Registry::{
        RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
        HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SZ,
    };

    use super::{wide_null, RUN_SUBKEY};
    use crate::autostart::error::{AutostartError, Result};

    /// Open `Run` key, closed on drop.
    struct RunKey(HKEY);

    impl RunKey {
        fn open(access: u32) -> Result<Self> {
            let subkey = wide_null(RUN_SUBKEY);
            let mut key: HKEY = 0;
            let status =
                unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, subkey.as_ptr(), 0, access, &mut key) };
            if status != 0 {
                return Err(AutostartError::RegistryOpen { status });
            }
            Ok(Self(key))
        }
    }

    impl Drop for RunKey {
        fn drop(&mut self) {
            unsafe { RegCloseKey(self.0) };
        }
    }

    pub(super) fn set_value(name: &str, value: &str) -> Result<()> {
        let key = RunKey::open(KEY_SET_VALUE)?;
        let name_w = wide_null(name);
        let value_w = wide_null(value);
        let bytes: Vec<u8> = value_w.iter().flat_map(|unit| unit.to_le_bytes()).collect();
        let size = u32::try_from(bytes.len()).map_err(|_| AutostartError::RegistryValueTooLarge)?;

        let status =
            unsafe { RegSetValueExW(key.0, name_w.as_ptr(), 0, REG_SZ, bytes.as_ptr(), size) };
        if status != 0 {
            return Err(AutostartError::RegistrySet { status });
        }
        Ok(())
    }

    pub(super) fn value_exists(name: &str) -> Result<bool> {
        let key = RunKey::open(KEY_QUERY_VALUE)?;
        let name_w = wide_null(name);
        let mut size_bytes: u32 = 0;

        let status = unsafe {
            RegQueryValueExW(
                key.0,
                name_w.as_ptr(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                &mut size_bytes,
            )
        };
        match status {
            0 => Ok(true),
            ERROR_FILE_NOT_FOUND => Ok(false),
            status => Err(AutostartError::RegistryQuery { status }),
        }
    }

    pub(super) fn delete_value(name: &str) -> Result<()> {
        let key = RunKey::open(KEY_SET_VALUE)?;
        let name_w = wide_null(name);

        let status = unsafe { RegDeleteValueW(key.0, name_w.as_ptr()) };
        match status {
            0 | ERROR_FILE_NOT_FOUND => Ok(()),
            status => Err(AutostartError::RegistryDelete { status }),
        }
    }
}

#[cfg(target_os = "windows")]
impl super::AutostartRegistry for WindowsRunKey {
    fn register(&self, executable: &Path) -> super::Result<()> {
        registry::set_value(REGISTRY_VALUE_NAME, &run_command(executable))?;
        tracing::info!("Run key value {} set", REGISTRY_VALUE_NAME);
        Ok(())
    }

    fn unregister(&self) -> super::Result<()> {
        registry::delete_value(REGISTRY_VALUE_NAME)?;
        tracing::info!("Run key value {} removed", REGISTRY_VALUE_NAME);
        Ok(())
    }

    fn is_registered(&self) -> bool {
        match registry::value_exists(REGISTRY_VALUE_NAME) {
            Ok(exists) => exists,
            Err(e) => {
                tracing::debug!("Failed to query Run key: {}", e);
                false
            }
        }
    }

    fn location(&self) -> String {
        Self::value_path()
    }
}
