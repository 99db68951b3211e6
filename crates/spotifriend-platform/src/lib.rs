pub mod cookies;
pub mod launch;
pub mod opener;
pub mod paths;
pub mod store;

pub use cookies::{
    find_session_cookie, BrowserCookie, CookieSource, NetscapeCookieJar, StaticCookieSource,
    SESSION_COOKIE_NAME,
};
pub use launch::is_first_launch;
pub use opener::{LinkOpener, SystemOpener};
pub use paths::{config_dir, data_dir, ensure_dirs, store_file};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStore};
