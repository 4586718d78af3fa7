//! Event handling for tray menu interactions.
//!
//! This module handles:
//! - Mapping clicked menu items to actions
//! - Converting actions into shell commands for the app
//!
//! The mapping is platform-independent. Receiving the native click events
//! happens in the platform-specific part of [`super::TrayIconManager`].

use std::fmt;

use crate::daemon::ShellCommand;

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Pause or resume the countdown
    TogglePause,
    /// Open the settings surface
    OpenSettings,
    /// Quit the application
    Exit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::TogglePause => write!(f, "toggle_pause"),
            MenuAction::OpenSettings => write!(f, "open_settings"),
            MenuAction::Exit => write!(f, "exit"),
        }
    }
}

impl MenuAction {
    /// Returns the shell command for this action.
    pub fn to_command(&self) -> ShellCommand {
        match self {
            MenuAction::TogglePause => ShellCommand::TogglePause,
            MenuAction::OpenSettings => ShellCommand::OpenSettings,
            MenuAction::Exit => ShellCommand::RequestExit,
        }
    }
}

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    /// Pause/Resume item
    PauseResume,
    /// Settings item
    Settings,
    /// Exit item
    Exit,
    /// Status line or anything else that does not act
    Unknown,
}

impl MenuItemId {
    /// Converts a menu item ID to the corresponding action.
    pub fn to_action(&self) -> Option<MenuAction> {
        match self {
            MenuItemId::PauseResume => Some(MenuAction::TogglePause),
            MenuItemId::Settings => Some(MenuAction::OpenSettings),
            MenuItemId::Exit => Some(MenuAction::Exit),
            MenuItemId::Unknown => None,
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Turns menu clicks into shell commands.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click.
    ///
    /// Returns `None` for items that do not trigger anything.
    pub fn handle_click(&self, item_id: MenuItemId) -> Option<ShellCommand> {
        let action = item_id.to_action()?;
        tracing::info!(action = %action, "menu action received");
        Some(action.to_command())
    }
}

// ============================================================================
// TrayUpdate
// ============================================================================

/// Updates sent to the tray icon over a crossbeam channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// New status string for the tooltip, title and status item
    SetStatus(String),
}

// ============================================================================
// Tests
// ============================================================================
