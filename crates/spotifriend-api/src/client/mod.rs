//! HTTP client for the token exchange and the buddy-list fetch.

mod config;
mod decode;


pub use config::{SpotifyConfig, BUDDYLIST_URL, TOKEN_URL};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, COOKIE, USER_AGENT};
use tracing::{debug, warn};

use crate::error::{AuthError, FetchError};
use crate::models::Friend;
use crate::urls::UrlBuilder;
use crate::FriendSource;

use decode::{check_status, decode_friends, decode_token};

/// Short-lived bearer token. Valid for one fetch cycle only.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Talks to the web player's private endpoints.
pub struct SpotifyClient {
    config: SpotifyConfig,
    urls: UrlBuilder,
    http: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            urls: UrlBuilder::new(config.web_base_url.clone()),
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Link builder rooted at the configured web player.
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Exchange the `sp_dc` session cookie for a bearer token.
    pub async fn fetch_access_token(&self, cookie: &str) -> Result<AccessToken, FetchError> {
        if cookie.is_empty() {
            return Err(AuthError::NoCookie.into());
        }

        debug!("token exchange request");
        let response = self
            .http
            .get(&self.config.token_url)
            .header(COOKIE, format!("sp_dc={cookie}"))
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        check_status(response.status())?;
        let body = response.bytes().await?;
        let token = decode_token(&body)?;

        if token.is_anonymous {
            warn!("token exchange returned an anonymous token; the session cookie may be stale");
        }
        Ok(AccessToken(token.access_token))
    }

    /// Fetch the buddy list, reversed relative to server order.
    pub async fn fetch_friends(&self, token: &AccessToken) -> Result<Vec<Friend>, FetchError> {
        debug!("buddy list request");
        let response = self
            .http
            .get(&self.config.buddylist_url)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        check_status(response.status())?;
        let body = response.bytes().await?;
        let friends = decode_friends(&body, &self.urls)?;
        debug!(count = friends.len(), "buddy list decoded");
        Ok(friends)
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new(SpotifyConfig::default())
    }
}

#[async_trait]
impl FriendSource for SpotifyClient {
    async fn fetch_friend_list(&self, cookie: &str) -> Result<Vec<Friend>, FetchError> {
        let token = self.fetch_access_token(cookie).await?;
        self.fetch_friends(&token).await
    }
}
