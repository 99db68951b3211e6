//! Remote endpoint configuration.

use serde::{Deserialize, Serialize};

/// Endpoints of the streaming service's private web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Session-cookie to bearer-token exchange.
    pub token_url: String,
    /// Presence endpoint returning the buddy list.
    pub buddylist_url: String,
    /// Base of all derived `open.spotify.com` links.
    pub web_base_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token_url: "https://open.spotify.com/get_access_token?reason=transport&productType=web_player"
                .into(),
            buddylist_url: "https://guc-spclient.spotify.com/presence-view/v1/buddylist".into(),
            web_base_url: "https://open.spotify.com".into(),
            user_agent: format!("spotifriend/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
