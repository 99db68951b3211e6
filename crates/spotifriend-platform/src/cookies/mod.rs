//! Cookie sources consulted after an interactive login.
//!
//! The login itself happens in a browser outside this process. Once it is
//! done, the browser's cookie jar is read through a [`CookieSource`] and
//! the `sp_dc` value becomes the session cookie.

mod netscape;

pub use netscape::NetscapeCookieJar;

use async_trait::async_trait;
use spotifriend_common::PlatformError;

/// Name of the session cookie set by the web player.
pub const SESSION_COOKIE_NAME: &str = "sp_dc";

/// A cookie as captured from a browser profile.
#[derive(Clone, PartialEq, Eq)]
pub struct BrowserCookie {
    pub domain: String,
    pub name: String,
    pub value: String,
    /// Unix seconds; `None` for session cookies.
    pub expires: Option<i64>,
}

impl std::fmt::Debug for BrowserCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserCookie")
            .field("domain", &self.domain)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("expires", &self.expires)
            .finish()
    }
}

impl BrowserCookie {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        matches!(self.expires, Some(exp) if exp <= now_unix)
    }
}

/// Somewhere login cookies can be read from.
#[async_trait]
pub trait CookieSource: Send + Sync {
    async fn cookies(&self) -> Result<Vec<BrowserCookie>, PlatformError>;
}

/// Pick the first live, non-empty `sp_dc` cookie.
pub fn find_session_cookie(cookies: &[BrowserCookie], now_unix: i64) -> Option<&BrowserCookie> {
    cookies.iter().find(|c| {
        c.name == SESSION_COOKIE_NAME && !c.value.is_empty() && !c.is_expired(now_unix)
    })
}

/// A fixed set of cookies, e.g. a value pasted on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticCookieSource {
    cookies: Vec<BrowserCookie>,
}

impl StaticCookieSource {
    pub fn new(cookies: Vec<BrowserCookie>) -> Self {
        Self { cookies }
    }

    /// A source holding a single `sp_dc` session cookie.
    pub fn session(value: impl Into<String>) -> Self {
        Self::new(vec![BrowserCookie {
            domain: ".spotify.com".into(),
            name: SESSION_COOKIE_NAME.into(),
            value: value.into(),
            expires: None,
        }])
    }
}

#[async_trait]
impl CookieSource for StaticCookieSource {
    async fn cookies(&self) -> Result<Vec<BrowserCookie>, PlatformError> {
        Ok(self.cookies.clone())
    }
}
