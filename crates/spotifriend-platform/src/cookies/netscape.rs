//! Netscape / curl `cookies.txt` jar files.

use std::path::PathBuf;

use async_trait::async_trait;
use spotifriend_common::PlatformError;
use tracing::{debug, warn};

use super::{BrowserCookie, CookieSource};

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Reads cookies from a Netscape-format jar exported by a browser.
#[derive(Debug, Clone)]
pub struct NetscapeCookieJar {
    path: PathBuf,
}

impl NetscapeCookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CookieSource for NetscapeCookieJar {
    async fn cookies(&self) -> Result<Vec<BrowserCookie>, PlatformError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PlatformError::CookieSource(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let cookies = parse_jar(&content);
        debug!(path = %self.path.display(), count = cookies.len(), "cookie jar read");
        Ok(cookies)
    }
}

/// Parse jar contents, skipping comments and malformed lines.
pub(crate) fn parse_jar(content: &str) -> Vec<BrowserCookie> {
    let mut cookies = Vec::new();
    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            warn!(line = lineno + 1, "skipping malformed cookie line");
            continue;
        }

        let expires = match fields[4].parse::<i64>() {
            Ok(0) => None,
            Ok(ts) => Some(ts),
            Err(_) => {
                warn!(line = lineno + 1, "skipping cookie with bad expiry");
                continue;
            }
        };

        cookies.push(BrowserCookie {
            domain: fields[0].to_string(),
            name: fields[5].to_string(),
            value: fields[6].to_string(),
            expires,
        });
    }
    cookies
}
