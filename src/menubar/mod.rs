//! Tray presence for the timer.
//!
//! This module provides:
//! - Tray icon with a live status tooltip (e.g., "Pomodoro: Working (15:30)")
//! - Context menu with Pause/Resume, Settings and Exit
//! - Mapping of menu clicks to shell commands
//!
//! # Architecture
//!
//! - `menu.rs`: Menu configuration (platform-independent, fully testable)
//! - `event.rs`: Event types and handling (platform-independent, fully testable)
//! - `mod.rs`: TrayIconManager (native tray on macOS, no-op elsewhere) and
//!   [`TraySink`], which forwards status strings over a crossbeam channel
//!
//! ```ignore
//! use pomotray::menubar::{TrayIconManager, TraySink};
//!
//! let (sink, rx) = TraySink::channel();
//! let mut manager = TrayIconManager::new(rx);
//! manager.initialize("Working (25:00)")?;
//! // sink goes into the phase controller's SinkSet
//! ```

pub mod event;
pub mod menu;

pub use event::{EventHandler, MenuAction, MenuItemId, TrayUpdate};
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};

use crossbeam_channel::{Receiver, Sender};

use crate::daemon::ShellCommand;
use crate::notification::NotificationSink;

// ============================================================================
// TraySink
// ============================================================================

/// Notification sink that feeds status strings to the tray.
#[derive(Debug, Clone)]
pub struct TraySink {
    tx: Sender<TrayUpdate>,
}

impl TraySink {
    pub fn new(tx: Sender<TrayUpdate>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end for the tray.
    pub fn channel() -> (Self, Receiver<TrayUpdate>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl NotificationSink for TraySink {
    fn notify(&self, _title: &str, _body: &str) {}

    fn set_status(&self, status: &str) {
        if self.tx.send(TrayUpdate::SetStatus(status.to_string())).is_err() {
            tracing::debug!("tray update channel closed");
        }
    }
}

// ============================================================================
// TrayIconManager
// ============================================================================

#[cfg(target_os = "macos")]
struct NativeItems {
    status: tray_icon::menu::MenuItem,
    pause_resume: tray_icon::menu::MenuItem,
    ids: std::collections::HashMap<tray_icon::menu::MenuId, MenuItemId>,
}

/// Manages the tray icon and its menu.
///
/// On macOS it owns the native tray-icon instance. On other platforms it
/// only tracks the latest status and never yields menu clicks.
pub struct TrayIconManager {
    menu_builder: MenuBuilder,
    #[cfg(target_os = "macos")]
    event_handler: EventHandler,
    update_rx: Receiver<TrayUpdate>,
    status: String,
    initialized: bool,
    #[cfg(target_os = "macos")]
    tray_icon: Option<tray_icon::TrayIcon>,
    #[cfg(target_os = "macos")]
    items: Option<NativeItems>,
}

impl TrayIconManager {
    /// Creates a manager. The native icon is created by
    /// [`initialize`](Self::initialize).
    pub fn new(update_rx: Receiver<TrayUpdate>) -> Self {
        Self {
            menu_builder: MenuBuilder::new(),
            #[cfg(target_os = "macos")]
            event_handler: EventHandler::new(),
            update_rx,
            status: String::new(),
            initialized: false,
            #[cfg(target_os = "macos")]
            tray_icon: None,
            #[cfg(target_os = "macos")]
            items: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Latest status string received.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current tooltip text.
    pub fn tooltip(&self) -> String {
        MenuBuilder::tooltip(&self.status)
    }

    /// Current menu configuration.
    pub fn menu_config(&self) -> MenuConfig {
        self.menu_builder.build(&self.status)
    }

    /// Applies every queued update. Returns how many were applied.
    pub fn process_pending_updates(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.update_rx.try_recv() {
                Ok(update) => {
                    self.handle_update(update);
                    processed += 1;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    tracing::warn!("tray update channel disconnected");
                    break;
                }
            }
        }
        processed
    }

    fn handle_update(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::SetStatus(status) => {
                tracing::trace!(status = %status, "tray status update");
                self.status = status;
                self.apply_status();
            }
        }
    }

    /// Removes the tray icon.
    pub fn shutdown(&mut self) {
        tracing::info!("tray shutting down");
        self.initialized = false;
        #[cfg(target_os = "macos")]
        {
            self.items = None;
            self.tray_icon = None;
        }
    }

    /// Creates the native tray icon (macOS only).
    ///
    /// # Errors
    ///
    /// Returns an error if the tray icon or its menu cannot be created.
    #[cfg(target_os = "macos")]
    pub fn initialize(&mut self, status: &str) -> anyhow::Result<()> {
        use anyhow::Context;
        use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};
        use tray_icon::TrayIconBuilder;

        self.status = status.to_string();
        let config = self.menu_builder.build(status);

        let menu = Menu::new();
        let status_item = MenuItem::new(&config.status.text, config.status.enabled, None);
        let pause_item = MenuItem::new(
            &config.pause_resume.text,
            config.pause_resume.enabled,
            None,
        );
        let settings_item = MenuItem::new(&config.settings.text, config.settings.enabled, None);
        let exit_item = MenuItem::new(&config.exit.text, config.exit.enabled, None);

        menu.append(&status_item)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&pause_item)?;
        menu.append(&settings_item)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&exit_item)?;

        let mut ids = std::collections::HashMap::new();
        ids.insert(pause_item.id().clone(), MenuItemId::PauseResume);
        ids.insert(settings_item.id().clone(), MenuItemId::Settings);
        ids.insert(exit_item.id().clone(), MenuItemId::Exit);

        let tray_icon = TrayIconBuilder::new()
            .with_title(status)
            .with_tooltip(MenuBuilder::tooltip(status))
            .with_menu(Box::new(menu))
            .build()
            .context("Failed to create tray icon")?;

        self.tray_icon = Some(tray_icon);
        self.items = Some(NativeItems {
            status: status_item,
            pause_resume: pause_item,
            ids,
        });
        self.initialized = true;

        tracing::info!("tray icon initialized");
        Ok(())
    }

    /// Initializes the tray (non-macOS, no native icon).
    #[cfg(not(target_os = "macos"))]
    pub fn initialize(&mut self, status: &str) -> anyhow::Result<()> {
        tracing::warn!("Native tray icon is only supported on macOS; using console status");
        self.status = status.to_string();
        self.initialized = true;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn apply_status(&self) {
        if let Some(ref tray_icon) = self.tray_icon {
            tray_icon.set_title(Some(&self.status));
            if let Err(e) = tray_icon.set_tooltip(Some(self.tooltip())) {
                tracing::debug!("Failed to set tray tooltip: {}", e);
            }
        }
        if let Some(ref items) = self.items {
            items.status.set_text(&self.status);
            items.pause_resume.set_text(MenuBuilder::pause_label(&self.status));
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn apply_status(&self) {}

    /// Returns the command for the next pending menu click, if any.
    #[cfg(target_os = "macos")]
    pub fn poll_menu_command(&self) -> Option<ShellCommand> {
        let items = self.items.as_ref()?;
        let event = tray_icon::menu::MenuEvent::receiver().try_recv().ok()?;
        let item_id = items
            .ids
            .get(&event.id)
            .copied()
            .unwrap_or(MenuItemId::Unknown);
        self.event_handler.handle_click(item_id)
    }

    /// Returns the command for the next pending menu click (never on this
    /// platform).
    #[cfg(not(target_os = "macos"))]
    pub fn poll_menu_command(&self) -> Option<ShellCommand> {
        None
    }
}

impl std::fmt::Debug for TrayIconManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayIconManager")
            .field("initialized", &self.initialized)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager() {
        let (_sink, rx) = TraySink::channel();
        let manager = TrayIconManager::new(rx);
        assert!(!manager.is_initialized());
        assert_eq!(manager.status(), "");
    }

    #[test]
    fn test_sink_updates_status() {
        let (sink, rx) = TraySink::channel();
        let mut manager = TrayIconManager::new(rx);

        sink.set_status("Working (24:59)");
        sink.set_status("Working (24:58)");

        assert_eq!(manager.process_pending_updates(), 2);
        assert_eq!(manager.status(), "Working (24:58)");
        assert_eq!(manager.tooltip(), "Pomodoro: Working (24:58)");
    }

    #[test]
    fn test_sink_ignores_notifications() {
        let (sink, rx) = TraySink::channel();
        let mut manager = TrayIconManager::new(rx);

        sink.notify("Time to take a break!", "");

        assert_eq!(manager.process_pending_updates(), 0);
    }

    #[test]
    fn test_menu_config_follows_pause() {
        let (sink, rx) = TraySink::channel();
        let mut manager = TrayIconManager::new(rx);

        sink.set_status("Paused");
        manager.process_pending_updates();

        assert_eq!(manager.menu_config().pause_resume.text, "Resume");
    }

    #[test]
    fn test_shutdown_clears_initialized() {
        let (sink, rx) = TraySink::channel();
        let mut manager = TrayIconManager::new(rx);
        manager.initialized = true;

        manager.shutdown();
        assert!(!manager.is_initialized());

        sink.set_status("Working (10:00)");
        assert_eq!(manager.process_pending_updates(), 1);
        assert_eq!(manager.status(), "Working (10:00)");
    }

    #[test]
    fn test_menu_clicks_not_polled_without_native_tray() {
        let (_sink, rx) = TraySink::channel();
        let manager = TrayIconManager::new(rx);

        assert_eq!(manager.poll_menu_command(), None);
    }

    #[test]
    fn test_sink_after_manager_dropped() {
        let (sink, rx) = TraySink::channel();
        drop(rx);
        sink.set_status("Working (1:00)");
    }
}
