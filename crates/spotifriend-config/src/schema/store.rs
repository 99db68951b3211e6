//! Session store configuration.

use serde::{Deserialize, Serialize};

/// Where the session cookie lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the store file. Empty means the platform data directory.
    pub path: String,
    pub cookie_key: String,
    /// Key used by older builds; migrated to `cookie_key` on first read.
    pub legacy_cookie_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            cookie_key: "spDcCookie".into(),
            legacy_cookie_key: "group.app.zane.spotifriend.spDcCookie".into(),
        }
    }
}
