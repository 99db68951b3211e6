//! Response bodies exactly as the remote API sends them.

use serde::Deserialize;

/// Body of the token exchange.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub is_anonymous: bool,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("is_anonymous", &self.is_anonymous)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BuddyList {
    pub friends: Vec<WireFriend>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireFriend {
    pub timestamp: i64,
    pub user: WireUser,
    pub track: WireTrack,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireUser {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub album: WireEntity,
    pub artist: WireEntity,
    pub context: WireContext,
}

/// Albums and artists share one shape.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireEntity {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireContext {
    pub uri: String,
    pub name: String,
    pub index: i64,
}
