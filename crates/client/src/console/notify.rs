//! Transient success/error notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

/// How long a notification stays visible by default.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    posted_at: Instant,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Queue of notifications that dismiss themselves after a TTL.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    entries: VecDeque<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: VecDeque::new(),
        }
    }

    /// Reads `NOTIFICATION_TTL_MS`, falling back to the default TTL.
    pub fn from_env() -> Self {
        let ttl = std::env::var("NOTIFICATION_TTL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_NOTIFICATION_TTL);
        Self::new(ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NotificationKind::Error, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.entries.push_back(Notification {
            kind,
            message: message.into(),
            posted_at: now,
        });
    }

    /// Drops every notification older than the TTL.
    pub fn dismiss_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|n| now.saturating_duration_since(n.posted_at) < ttl);
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn visible_at(&mut self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.dismiss_expired(now);
        self.entries.iter()
    }

    /// Notifications still visible now.
    pub fn visible(&mut self) -> impl Iterator<Item = &Notification> {
        self.visible_at(Instant::now())
    }

    /// The most recent notification, expired or not.
    pub fn last(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
