//! Notification error types.

use thiserror::Error;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The platform notification service rejected the request.
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
}
