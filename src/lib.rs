//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer.
//! It includes:
//! - Phase controller alternating work and rest countdowns
//! - Settings persistence with per-field validation
//! - Autostart registration (LaunchAgent, XDG autostart, Windows Run key)
//! - Notification sinks (desktop notifications, console, tray)
//! - Menu bar UI with tray icon (macOS only)
//! - CLI command parsing and display utilities

pub mod autostart;
pub mod cli;
pub mod daemon;
pub mod menubar;
pub mod notification;
pub mod settings;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Phase, PhaseState, SettingsDraft, TimerConfig, TransitionStatus};

pub use daemon::{
    format_status, App, EventLoop, PhaseController, SettingsView, ShellCommand, ShellResponse,
    TickOutcome, TickSchedule, PAUSED_STATUS,
};

pub use settings::{default_settings_path, SettingsError, SettingsStore};

pub use autostart::{
    platform_registry, platform_registry_or_unavailable, AutostartError, AutostartRegistry,
    MockAutostart, UnavailableAutostart,
};

pub use notification::{
    DesktopNotifier, LogNotifier, MockNotificationSink, NotificationError, NotificationSink,
    NotificationType, SinkSet,
};

// Re-export menubar types
pub use menubar::{
    EventHandler, MenuAction, MenuBuilder, MenuConfig, MenuItemConfig, MenuItemId,
    TrayIconManager, TraySink, TrayUpdate,
};
