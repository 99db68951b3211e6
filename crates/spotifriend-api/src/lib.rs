//! Client for the web player's private presence API.
//!
//! Provides:
//! - Session-cookie to bearer-token exchange
//! - Buddy-list fetch and decoding into [`Friend`] values
//! - The `spotify:` URI to `open.spotify.com` URL builder
//! - Relative "last active" timestamps

pub mod client;
pub mod error;
pub mod models;
pub mod timestamp;
pub mod urls;

use async_trait::async_trait;

pub use client::{AccessToken, SpotifyClient, SpotifyConfig};
pub use error::{AuthError, FetchError};
pub use models::{Album, Artist, Context, Friend, Track, User};
pub use timestamp::{format_timestamp, RelativeTime};
pub use urls::UrlBuilder;

/// Anything that can turn a session cookie into the current friend list.
///
/// Implemented by [`SpotifyClient`]; the engine and the widget only see
/// this trait.
#[async_trait]
pub trait FriendSource: Send + Sync {
    /// Exchange `cookie` for a token and fetch the friend list with it,
    /// in reverse server order.
    async fn fetch_friend_list(&self, cookie: &str) -> Result<Vec<Friend>, FetchError>;
}
