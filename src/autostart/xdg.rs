//! XDG autostart backend (Linux and other freedesktop systems).
//!
//! Desktop sessions launch every `*.desktop` file found in
//! `$XDG_CONFIG_HOME/autostart` at login.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{AutostartError, Result};
use super::{AutostartRegistry, APP_NAME};

/// File name of the desktop entry.
pub const DESKTOP_FILE_NAME: &str = "pomotray.desktop";

/// Registers the timer through a desktop entry file.
#[derive(Debug, Clone)]
pub struct XdgAutostart {
    autostart_dir: PathBuf,
}

impl XdgAutostart {
    /// Uses `<config dir>/autostart`.
    ///
    /// # Errors
    /// Returns an error if the user config directory cannot be determined.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or(AutostartError::ConfigDirectoryNotFound)?;
        Ok(Self::with_dir(config_dir.join("autostart")))
    }

    /// Uses an explicit autostart directory.
    pub fn with_dir(autostart_dir: impl Into<PathBuf>) -> Self {
        Self {
            autostart_dir: autostart_dir.into(),
        }
    }

    /// Path of the desktop entry.
    pub fn entry_path(&self) -> PathBuf {
        self.autostart_dir.join(DESKTOP_FILE_NAME)
    }
}

/// Renders the desktop entry launching `executable run`.
pub fn desktop_entry(executable: &Path) -> String {
    let exec = quote_exec_arg(&executable.to_string_lossy());
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={APP_NAME}\n\
         Comment=Work/rest interval timer\n\
         Exec={exec} run\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n"
    )
}

/// Quotes one `Exec=` argument.
///
/// Arguments with reserved characters are wrapped in double quotes, and
/// `"`, `` ` ``, `$` and `\` are backslash-escaped inside the quotes.
fn quote_exec_arg(arg: &str) -> String {
    const RESERVED: &[char] = &[
        ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#',
        '(', ')', '`',
    ];
    if !arg.contains(RESERVED) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl AutostartRegistry for XdgAutostart {
    fn register(&self, executable: &Path) -> Result<()> {
        fs::create_dir_all(&self.autostart_dir).map_err(AutostartError::DirectoryCreation)?;

        let entry_path = self.entry_path();
        fs::write(&entry_path, desktop_entry(executable)).map_err(AutostartError::EntryWrite)?;

        tracing::info!("Autostart entry written at {:?}", entry_path);
        Ok(())
    }

    fn unregister(&self) -> Result<()> {
        let entry_path = self.entry_path();
        if !entry_path.exists() {
            tracing::debug!("Autostart entry does not exist, nothing to remove");
            return Ok(());
        }

        fs::remove_file(&entry_path).map_err(AutostartError::EntryRemove)?;

        tracing::info!("Autostart entry removed");
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.entry_path().exists()
    }

    fn location(&self) -> String {
        self.entry_path().display().to_string()
    }
}
