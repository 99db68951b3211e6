//! External key-value store holding the session cookie.
//!
//! The engine never owns credentials: it reads, writes and clears them
//! through [`KeyValueStore`]. [`SessionStore`] layers the cookie key and
//! the legacy-key migration on top.

mod file;
mod memory;
mod session;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::SessionStore;

use spotifriend_common::PlatformError;

/// A string-to-string store shared between processes.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;
    fn remove(&self, key: &str) -> Result<(), PlatformError>;
}
