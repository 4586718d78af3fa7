//! Menu configuration for the tray icon.
//!
//! Decides item labels from the current status string. The native menu is
//! assembled from this configuration in the platform-specific code.

use crate::daemon::PAUSED_STATUS;

/// Application title shown in the tooltip prefix.
pub const TOOLTIP_PREFIX: &str = "Pomodoro";

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
}

impl MenuItemConfig {
    pub fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
        }
    }
}

/// Complete tray menu configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Status line (always disabled)
    pub status: MenuItemConfig,
    /// "Pause" while running, "Resume" while paused
    pub pause_resume: MenuItemConfig,
    /// Settings item
    pub settings: MenuItemConfig,
    /// Exit item
    pub exit: MenuItemConfig,
}

/// Builds menu configuration from the status string.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, status: &str) -> MenuConfig {
        MenuConfig {
            status: MenuItemConfig::new(status, false),
            pause_resume: MenuItemConfig::new(Self::pause_label(status), true),
            settings: MenuItemConfig::new("Settings", true),
            exit: MenuItemConfig::new("Exit", true),
        }
    }

    /// Label of the pause/resume item.
    pub fn pause_label(status: &str) -> &'static str {
        if Self::is_paused(status) {
            "Resume"
        } else {
            "Pause"
        }
    }

    /// The status string is the fixed paused indicator exactly when paused.
    pub fn is_paused(status: &str) -> bool {
        status == PAUSED_STATUS
    }

    /// Tooltip text, e.g. `"Pomodoro: Working (24:59)"`.
    pub fn tooltip(status: &str) -> String {
        format!("{}: {}", TOOLTIP_PREFIX, status)
    }
}
