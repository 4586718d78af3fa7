//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - Settings (plain text and JSON)
//! - Responses to shell commands
//! - Error messages

use crate::daemon::{SettingsView, ShellResponse};
use crate::types::TimerConfig;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the settings surface.
    pub fn show_settings(view: &SettingsView) {
        println!("{}", Self::render_settings(view));
    }

    /// Shows the settings surface as JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn show_settings_json(view: &SettingsView) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(view)?);
        Ok(())
    }

    /// Shows the outcome of a shell command. `Exit` prints nothing.
    pub fn show_response(response: &ShellResponse) {
        if let Some(text) = Self::render_response(response) {
            println!("\r\x1b[2K{}", text);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    pub fn render_settings(view: &SettingsView) -> String {
        let autostart = if view.autostart_registered {
            "registered"
        } else {
            "not registered"
        };
        format!(
            "Pomodoro Timer settings\n\
             ───────────────────────\n\
             {}\n\
             Paused: {}\n\
             Settings file: {}\n\
             Autostart entry: {} ({})",
            Self::render_config(&view.config),
            Self::yes_no(view.paused),
            view.settings_path.display(),
            view.autostart_location,
            autostart,
        )
    }

    pub fn render_config(config: &TimerConfig) -> String {
        format!(
            "Work: {} min\nRest: {} min\nStart at login: {}",
            config.work_minutes,
            config.rest_minutes,
            Self::yes_no(config.auto_start_enabled)
        )
    }

    pub fn render_response(response: &ShellResponse) -> Option<String> {
        match response {
            ShellResponse::Settings(view) => Some(Self::render_settings(view)),
            ShellResponse::PauseToggled { paused: true } => Some("|| Paused".to_string()),
            ShellResponse::PauseToggled { paused: false } => Some("> Resumed".to_string()),
            ShellResponse::Saved(config) => Some(format!(
                "* Settings saved\n{}",
                Self::render_config(config)
            )),
            ShellResponse::Status(status) => Some(status.clone()),
            ShellResponse::Exit => None,
        }
    }

    fn yes_no(value: bool) -> &'static str {
        if value {
            "yes"
        } else {
            "no"
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
