//! User-facing notification output.
//!
//! The phase controller talks to the outside world through
//! [`NotificationSink`]: transient phase-complete messages plus the live
//! status string shown in the tray tooltip or console.
//!
//! Implementations:
//! - [`DesktopNotifier`]: native desktop notifications via `notify-rust`
//! - [`LogNotifier`]: logs only, used when notifications are disabled
//! - [`SinkSet`]: fans out to several sinks
//! - [`MockNotificationSink`]: records everything for tests

pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use self::error::NotificationError;

use crate::types::Phase;

/// Application name shown by the desktop notification daemon.
pub const APP_NAME: &str = "Pomodoro Timer";

// ============================================================================
// NotificationType
// ============================================================================

/// The two phase-complete notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// A work phase ran out.
    WorkComplete,
    /// A rest phase ran out.
    RestComplete,
}

impl NotificationType {
    /// Returns the notification emitted when `ended` runs out.
    pub fn for_ended(ended: Phase) -> Self {
        match ended {
            Phase::Working => NotificationType::WorkComplete,
            Phase::Resting => NotificationType::RestComplete,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NotificationType::WorkComplete => "Time to take a break!",
            NotificationType::RestComplete => "Break time over!",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            NotificationType::WorkComplete => "",
            NotificationType::RestComplete => "Ready to focus again?",
        }
    }
}

// ============================================================================
// NotificationSink
// ============================================================================

/// Output side of the phase controller.
///
/// Both calls are fire-and-forget: implementations must not block for long
/// and must swallow (and log) their own delivery failures.
pub trait NotificationSink {
    /// Presents a transient message.
    fn notify(&self, title: &str, body: &str);

    /// Replaces the live status string.
    fn set_status(&self, status: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }

    fn set_status(&self, status: &str) {
        (**self).set_status(status)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }

    fn set_status(&self, status: &str) {
        (**self).set_status(status)
    }
}

// ============================================================================
// DesktopNotifier
// ============================================================================

/// Sends native desktop notifications.
#[derive(Debug)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    /// Shows a notification and reports delivery failures.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::SendFailed`] if the platform
    /// notification service rejects the request.
    pub fn send(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .appname(&self.app_name)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(e) = self.send(title, body) {
            tracing::warn!("Desktop notification failed: {}", e);
        }
    }

    fn set_status(&self, _status: &str) {}
}

// ============================================================================
// LogNotifier
// ============================================================================

/// Writes notifications to the log instead of the desktop.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title = %title, body = %body, "notification");
    }

    fn set_status(&self, status: &str) {
        tracing::trace!(status = %status, "status");
    }
}

// ============================================================================
// SinkSet
// ============================================================================

/// Forwards every call to each contained sink in order.
#[derive(Default)]
pub struct SinkSet {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl SinkSet {
    #[must_use]
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Adds a sink.
    #[must_use]
    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NotificationSink for SinkSet {
    fn notify(&self, title: &str, body: &str) {
        for sink in &self.sinks {
            sink.notify(title, body);
        }
    }

    fn set_status(&self, status: &str) {
        for sink in &self.sinks {
            sink.set_status(status);
        }
    }
}

impl std::fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkSet")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

// ============================================================================
// MockNotificationSink
// ============================================================================

/// In-memory sink for tests.
///
/// Records every notification as a `(title, body)` pair and every status
/// string in order. Notifications can be dropped with
/// [`set_muted`](Self::set_muted).
#[derive(Debug, Default)]
pub struct MockNotificationSink {
    notifications: Mutex<Vec<(String, String)>>,
    statuses: Mutex<Vec<String>>,
    muted: AtomicBool,
}

impl MockNotificationSink {
    /// Creates a sink with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops notifications instead of recording them, as an unavailable
    /// desktop service would.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    /// Notifications recorded so far, oldest first.
    #[must_use]
    pub fn get_notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }

    /// Number of notifications recorded.
    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    /// Most recent status string, if any.
    #[must_use]
    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().unwrap().last().cloned()
    }

    /// Number of status updates recorded.
    #[must_use]
    pub fn status_count(&self) -> usize {
        self.statuses.lock().unwrap().len()
    }

    /// Forgets recorded notifications and statuses.
    pub fn clear_recorded(&self) {
        self.notifications.lock().unwrap().clear();
        self.statuses.lock().unwrap().clear();
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, title: &str, body: &str) {
        if self.muted.load(Ordering::SeqCst) {
            return;
        }
        self.notifications
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }

    fn set_status(&self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_string());
    }
}

// ============================================================================
// Tests
// ============================================================================
