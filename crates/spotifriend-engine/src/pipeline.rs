//! Session cookie to friend list.

use spotifriend_api::{AuthError, FetchError, Friend, FriendSource};
use spotifriend_platform::SessionStore;
use tracing::debug;

/// Read the stored session cookie and fetch the friend list with it.
///
/// A missing cookie fails with [`AuthError::NoCookie`] without touching
/// the network.
pub async fn fetch_friend_list(
    session: &SessionStore,
    source: &dyn FriendSource,
) -> Result<Vec<Friend>, FetchError> {
    let cookie = session
        .cookie()
        .map_err(|e| FetchError::Transport(format!("failed to read session: {e}")))?
        .ok_or(AuthError::NoCookie)?;

    let friends = source.fetch_friend_list(&cookie).await?;
    debug!(count = friends.len(), "fetched friend list");
    Ok(friends)
}
