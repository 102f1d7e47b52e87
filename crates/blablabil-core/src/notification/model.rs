//! In-app notification (toast) model.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique handle for a queued notification, used to dismiss it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A transient message queued for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Time until auto-dismissal. `None` keeps the notification up
    /// until it is dismissed explicitly.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, duration: Option<Duration>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            severity,
            created_at: chrono::Utc::now(),
            duration,
        }
    }
}
