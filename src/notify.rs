// 🔔 Notifications - non-blocking confirmations and inline errors
// Dismissal is fire-and-forget: each notification carries its own expiry and
// the center simply drops whatever has expired when asked.

use crate::errors::HubError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default on-screen lifetime, in seconds
pub const DEFAULT_DURATION_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
    /// On-screen lifetime; `None` takes the center's default
    pub duration_secs: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Notification {
            title: title.to_string(),
            description: description.into(),
            variant: Variant::Default,
            duration_secs: None,
            created_at: Utc::now(),
        }
    }

    pub fn destructive(title: &str, description: impl Into<String>) -> Self {
        Notification {
            variant: Variant::Destructive,
            ..Notification::info(title, description)
        }
    }

    pub fn with_duration(mut self, secs: i64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS)
    }

    /// Out-of-range lifetimes never expire
    pub fn expires_at(&self) -> DateTime<Utc> {
        TimeDelta::try_seconds(self.lifetime_secs())
            .and_then(|d| self.created_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl From<&HubError> for Notification {
    fn from(err: &HubError) -> Self {
        let description = match err {
            HubError::Validation { field, message } => format!("{} {}", field, message),
            HubError::UnsupportedFileType { file_name, expected } => {
                format!("{} is not supported - please upload {}", file_name, expected)
            }
        };
        Notification::destructive(err.title(), description)
    }
}

// ============================================================================
// NOTIFICATION CENTER
// ============================================================================

/// Holds the notifications currently on screen
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    default_duration_secs: Option<i64>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center whose notifications all use the given lifetime
    pub fn with_default_duration(secs: i64) -> Self {
        NotificationCenter {
            items: Vec::new(),
            default_duration_secs: Some(secs),
        }
    }

    pub fn push(&mut self, mut notification: Notification) {
        if notification.duration_secs.is_none() {
            notification.duration_secs = self.default_duration_secs;
        }
        self.items.push(notification);
    }

    /// Notifications still visible at `now`, oldest first
    pub fn active(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.items.iter().filter(|n| !n.is_expired(now)).collect()
    }

    /// Most recent notification still visible at `now`
    pub fn latest(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.items.iter().rev().find(|n| !n.is_expired(now))
    }

    /// Drop expired notifications, returning how many were removed
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
