//! `app-widget://play?id=<trackId>` links emitted by the widget.

use spotifriend_api::UrlBuilder;
use spotifriend_common::PlatformError;
use spotifriend_platform::LinkOpener;
use tracing::{debug, info};
use url::Url;

pub const WIDGET_SCHEME: &str = "app-widget";
const PLAY_ACTION: &str = "play";

#[derive(Debug, thiserror::Error)]
pub enum DeepLinkError {
    #[error("invalid link: {0}")]
    Invalid(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("link has no track id")]
    MissingTrackId,

    #[error("could not open track: {0}")]
    Open(#[from] PlatformError),
}

/// Where a play link ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// The native app accepted `spotify:track:<id>`.
    Native(String),
    /// The web player fallback.
    Web(String),
}

pub fn play_link(track_id: &str) -> String {
    format!("{WIDGET_SCHEME}://{PLAY_ACTION}?id={track_id}")
}

/// Extract the track id from a play link.
///
/// Track ids must be base62; the id ends up on a shell command line on
/// Windows.
pub fn parse_play_link(link: &str) -> Result<String, DeepLinkError> {
    let url = Url::parse(link).map_err(|e| DeepLinkError::Invalid(e.to_string()))?;
    if url.scheme() != WIDGET_SCHEME {
        return Err(DeepLinkError::UnsupportedScheme(url.scheme().to_string()));
    }
    match url.host_str() {
        Some(PLAY_ACTION) => {}
        other => return Err(DeepLinkError::UnknownAction(other.unwrap_or_default().to_string())),
    }
    let id = url
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, id)| id.into_owned())
        .filter(|id| !id.is_empty())
        .ok_or(DeepLinkError::MissingTrackId)?;
    if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(DeepLinkError::Invalid(format!("bad track id: {id:?}")));
    }
    Ok(id)
}

/// Open the track behind a play link, preferring the native app.
pub fn handle_play_link(
    link: &str,
    opener: &dyn LinkOpener,
    urls: &UrlBuilder,
) -> Result<Opened, DeepLinkError> {
    let track_id = parse_play_link(link)?;

    let native = format!("spotify:track:{track_id}");
    match opener.open(&native) {
        Ok(()) => {
            info!(track_id, "opened track in app");
            Ok(Opened::Native(native))
        }
        Err(e) => {
            debug!(error = %e, "native open failed, using web player");
            let web = urls.track(&track_id);
            opener.open(&web)?;
            info!(track_id, "opened track in browser");
            Ok(Opened::Web(web))
        }
    }
}
