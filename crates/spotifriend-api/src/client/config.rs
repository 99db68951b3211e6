//! Client configuration.

use crate::urls::WEB_BASE_URL;

pub const TOKEN_URL: &str =
    "https://open.spotify.com/get_access_token?reason=transport&productType=web_player";
pub const BUDDYLIST_URL: &str = "https://guc-spclient.spotify.com/presence-view/v1/buddylist";

/// Endpoints and headers for [`super::SpotifyClient`].
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub token_url: String,
    pub buddylist_url: String,
    pub web_base_url: String,
    pub user_agent: String,
}

impl SpotifyConfig {
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_buddylist_url(mut self, url: impl Into<String>) -> Self {
        self.buddylist_url = url.into();
        self
    }

    pub fn with_web_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            buddylist_url: BUDDYLIST_URL.to_string(),
            web_base_url: WEB_BASE_URL.to_string(),
            user_agent: format!("spotifriend/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
