//! Session-cookie access with legacy key migration.

use std::sync::Arc;

use spotifriend_common::PlatformError;
use tracing::info;

use super::KeyValueStore;

pub const DEFAULT_COOKIE_KEY: &str = "spDcCookie";
pub const DEFAULT_LEGACY_COOKIE_KEY: &str = "group.app.zane.spotifriend.spDcCookie";

/// Reads, writes and clears the `sp_dc` session cookie.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    cookie_key: String,
    legacy_key: Option<String>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("cookie_key", &self.cookie_key)
            .field("legacy_key", &self.legacy_key)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cookie_key: DEFAULT_COOKIE_KEY.to_string(),
            legacy_key: Some(DEFAULT_LEGACY_COOKIE_KEY.to_string()),
        }
    }

    pub fn with_keys(mut self, cookie_key: impl Into<String>, legacy_key: Option<String>) -> Self {
        self.cookie_key = cookie_key.into();
        self.legacy_key = legacy_key.filter(|k| !k.is_empty());
        self
    }

    /// Current session cookie, if any.
    ///
    /// Falls back to the legacy key; a value found there is moved to the
    /// canonical key. Empty values count as absent.
    pub fn cookie(&self) -> Result<Option<String>, PlatformError> {
        if let Some(value) = self.store.get(&self.cookie_key)?.filter(|v| !v.is_empty()) {
            return Ok(Some(value));
        }

        let Some(legacy_key) = &self.legacy_key else {
            return Ok(None);
        };
        match self.store.get(legacy_key)?.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.store.set(&self.cookie_key, &value)?;
                self.store.remove(legacy_key)?;
                info!("migrated session cookie from legacy key");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn set_cookie(&self, value: &str) -> Result<(), PlatformError> {
        self.store.set(&self.cookie_key, value)
    }

    /// Remove the cookie under both the canonical and the legacy key.
    pub fn clear(&self) -> Result<(), PlatformError> {
        self.store.remove(&self.cookie_key)?;
        if let Some(legacy_key) = &self.legacy_key {
            self.store.remove(legacy_key)?;
        }
        Ok(())
    }
}
