//! Poll cadence and notification timing.

use serde::{Deserialize, Serialize};

/// Foreground refresh cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between timer-driven refreshes (valid range: 5-3600).
    pub interval_secs: u32,
    /// Delay before reading captured cookies after a login, in milliseconds.
    pub login_settle_ms: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            login_settle_ms: 1000,
        }
    }
}

/// Transient notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Visibility window in milliseconds (valid range: 500-60000).
    pub ttl_ms: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { ttl_ms: 3000 }
    }
}
