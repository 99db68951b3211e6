use std::time::Duration;

use tokio::time::Instant;

/// How long a transient message stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Returns `true` once `ttl` has elapsed since creation.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Holds at most one live notification.
///
/// A new message replaces the current one outright. Expiry is keyed on the
/// creation timestamp, so a timer armed for a superseded message cannot
/// clear its replacement.
#[derive(Debug)]
pub struct NotificationSlot {
    current: Option<Notification>,
    ttl: Duration,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Replace the live notification and return its creation timestamp.
    pub fn show(&mut self, message: impl Into<String>) -> Instant {
        let notification = Notification::new(message);
        let created_at = notification.created_at;
        self.current = Some(notification);
        created_at
    }

    /// Clear the live notification if it was created at `created_at`.
    /// Returns `true` if something was cleared.
    pub fn expire(&mut self, created_at: Instant) -> bool {
        match &self.current {
            Some(n) if n.created_at == created_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}
