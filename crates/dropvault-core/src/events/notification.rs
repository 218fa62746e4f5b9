//! User-facing toast notifications.

use serde::{Deserialize, Serialize};

use crate::types::SimInstant;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// An operation completed.
    Success,
    /// An operation failed (only reachable through the upload failure hook).
    Error,
}

/// A message for the presentation layer to show briefly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Human-readable text.
    pub message: String,
    /// Simulated time the notification was raised.
    pub at: SimInstant,
}

impl Notification {
    /// A success notification.
    pub fn success(message: impl Into<String>, at: SimInstant) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            at,
        }
    }

    /// An error notification.
    pub fn error(message: impl Into<String>, at: SimInstant) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            at,
        }
    }
}
