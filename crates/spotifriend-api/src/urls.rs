//! `spotify:` URI to web URL conversion.

use url::Url;

/// Default base for derived web links.
pub const WEB_BASE_URL: &str = "https://open.spotify.com";

/// Builds `open.spotify.com` links from `spotify:<type>:<id>` URIs.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// `spotify:track:abc` -> `<base>/track/abc`.
    ///
    /// URIs with fewer than three segments map to the bare base URL.
    pub fn build(&self, uri: &str) -> String {
        let mut parts = uri.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(kind), Some(id)) if !kind.is_empty() && !id.is_empty() => {
                format!("{}/{kind}/{id}", self.base)
            }
            _ => self.base.clone(),
        }
    }

    /// Profile link for a user URI. Always uses the `/user/` path with the
    /// last segment as the id, whatever the type segment says.
    pub fn build_user(&self, uri: &str) -> String {
        let id = uri.rsplit(':').next().unwrap_or_default();
        format!("{}/user/{id}", self.base)
    }

    /// Web fallback for a track id, used when the native app is missing.
    pub fn track(&self, track_id: &str) -> String {
        format!("{}/track/{track_id}", self.base)
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(WEB_BASE_URL)
    }
}

/// The id segment of a `spotify:<type>:<id>` URI.
pub fn uri_id(uri: &str) -> Option<&str> {
    uri.split(':').nth(2).filter(|id| !id.is_empty())
}

/// Upgrade `http://` image links to `https://` and drop anything that
/// does not parse as a URL.
pub fn normalize_image_url(raw: &str) -> Option<String> {
    let upgraded = match raw.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => raw.to_string(),
    };
    Url::parse(&upgraded).ok().map(String::from)
}
