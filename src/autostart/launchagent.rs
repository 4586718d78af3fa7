//! macOS LaunchAgent backend.
//!
//! Registration writes `~/Library/LaunchAgents/com.pomotray.timer.plist`
//! with `RunAtLoad`, which launchd picks up at the next login. The agent is
//! not loaded into the current session so that enabling autostart never
//! spawns a second timer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{AutostartError, Result};
use super::AutostartRegistry;

/// LaunchAgent plist structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchAgentPlist {
    /// Service label (reverse domain format)
    #[serde(rename = "Label")]
    pub label: String,

    /// Program to execute with its arguments
    #[serde(rename = "ProgramArguments")]
    pub program_arguments: Vec<String>,

    /// Whether to start at login
    #[serde(rename = "RunAtLoad")]
    pub run_at_load: bool,

    /// Whether launchd restarts the process after it exits
    #[serde(rename = "KeepAlive")]
    pub keep_alive: bool,

    /// Process scheduling class
    #[serde(rename = "ProcessType", skip_serializing_if = "Option::is_none")]
    pub process_type: Option<String>,
}

impl LaunchAgentPlist {
    /// Service label for the timer.
    pub const LABEL: &'static str = "com.pomotray.timer";

    /// Creates the plist that launches `executable run` at login.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            label: Self::LABEL.to_string(),
            program_arguments: vec![executable.into(), "run".to_string()],
            run_at_load: true,
            keep_alive: false,
            process_type: Some("Interactive".to_string()),
        }
    }

    /// Generates the plist XML string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        plist::to_writer_xml(&mut buf, self).map_err(AutostartError::PlistSerialize)?;
        String::from_utf8(buf).map_err(AutostartError::PlistUtf8)
    }
}

/// Registers the timer as a per-user LaunchAgent.
#[derive(Debug, Clone)]
pub struct LaunchAgentRegistry {
    agents_dir: PathBuf,
}

impl LaunchAgentRegistry {
    /// Uses `~/Library/LaunchAgents`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or(AutostartError::HomeDirectoryNotFound)?;
        Ok(Self::with_dir(home_dir.join("Library/LaunchAgents")))
    }

    /// Uses an explicit LaunchAgents directory.
    pub fn with_dir(agents_dir: impl Into<PathBuf>) -> Self {
        Self {
            agents_dir: agents_dir.into(),
        }
    }

    /// Path of the plist file.
    pub fn plist_path(&self) -> PathBuf {
        self.agents_dir
            .join(format!("{}.plist", LaunchAgentPlist::LABEL))
    }
}

impl AutostartRegistry for LaunchAgentRegistry {
    fn register(&self, executable: &Path) -> Result<()> {
        let plist = LaunchAgentPlist::new(executable.to_string_lossy());
        let plist_xml = plist.to_xml()?;

        fs::create_dir_all(&self.agents_dir).map_err(AutostartError::DirectoryCreation)?;

        let plist_path = self.plist_path();
        fs::write(&plist_path, plist_xml).map_err(AutostartError::EntryWrite)?;

        // 0644: rw-r--r--
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&plist_path)
                .map_err(AutostartError::PermissionSet)?
                .permissions();
            perms.set_mode(0o644);
            fs::set_permissions(&plist_path, perms).map_err(AutostartError::PermissionSet)?;
        }

        tracing::info!("LaunchAgent written at {:?}", plist_path);
        Ok(())
    }

    fn unregister(&self) -> Result<()> {
        let plist_path = self.plist_path();
        if !plist_path.exists() {
            tracing::debug!("LaunchAgent plist does not exist, nothing to remove");
            return Ok(());
        }

        fs::remove_file(&plist_path).map_err(AutostartError::EntryRemove)?;

        tracing::info!("LaunchAgent removed");
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.plist_path().exists()
    }

    fn location(&self) -> String {
        self.plist_path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod plist_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_config() {
            let plist = LaunchAgentPlist::new("/Applications/pomotray");

            assert_eq!(plist.label, "com.pomotray.timer");
            assert_eq!(
                plist.program_arguments,
                vec!["/Applications/pomotray", "run"]
            );
            assert!(plist.run_at_load);
            assert!(!plist.keep_alive);
        }

        #[test]
        fn test_to_xml_generates_valid_xml() {
            let xml = LaunchAgentPlist::new("/usr/local/bin/pomotray")
                .to_xml()
                .expect("Failed to generate XML");

            assert!(xml.contains("<key>Label</key>"));
            assert!(xml.contains("<string>com.pomotray.timer</string>"));
            assert!(xml.contains("<key>RunAtLoad</key>"));
            assert!(xml.contains("<string>/usr/local/bin/pomotray</string>"));
            assert!(xml.contains("<key>ProcessType</key>"));
        }

        #[test]
        fn test_serialization_roundtrip() {
            let original = LaunchAgentPlist::new("/usr/local/bin/pomotray");
            let xml = original.to_xml().expect("Failed to generate XML");
            let parsed: LaunchAgentPlist =
                plist::from_bytes(xml.as_bytes()).expect("Failed to parse XML");

            assert_eq!(original, parsed);
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_register_writes_plist() {
            let dir = tempfile::tempdir().unwrap();
            let registry = LaunchAgentRegistry::with_dir(dir.path().join("LaunchAgents"));

            registry
                .register(Path::new("/usr/local/bin/pomotray"))
                .unwrap();

            assert!(registry.is_registered());
            let xml = fs::read_to_string(registry.plist_path()).unwrap();
            assert!(xml.contains("/usr/local/bin/pomotray"));
        }

        #[test]
        fn test_register_twice_overwrites() {
            let dir = tempfile::tempdir().unwrap();
            let registry = LaunchAgentRegistry::with_dir(dir.path());

            registry.register(Path::new("/old/pomotray")).unwrap();
            registry.register(Path::new("/new/pomotray")).unwrap();

            let xml = fs::read_to_string(registry.plist_path()).unwrap();
            assert!(xml.contains("/new/pomotray"));
            assert!(!xml.contains("/old/pomotray"));
        }

        #[test]
        fn test_unregister_idempotent() {
            let dir = tempfile::tempdir().unwrap();
            let registry = LaunchAgentRegistry::with_dir(dir.path());

            registry.unregister().unwrap();
            registry.register(Path::new("/usr/local/bin/pomotray")).unwrap();
            registry.unregister().unwrap();
            registry.unregister().unwrap();

            assert!(!registry.is_registered());
        }

        #[test]
        fn test_plist_path_format() {
            let registry = LaunchAgentRegistry::with_dir("/Users/test/Library/LaunchAgents");
            assert_eq!(
                registry.plist_path(),
                PathBuf::from("/Users/test/Library/LaunchAgents/com.pomotray.timer.plist")
            );
        }
    }
}
