use serde::Serialize;

use crate::urls::{normalize_image_url, uri_id, UrlBuilder};

use super::wire::{WireContext, WireEntity, WireFriend, WireTrack, WireUser};

/// One friend and what they are (or were last) listening to.
///
/// Identity is the user URI: two entries with the same `id` are the same
/// friend regardless of track.
#[derive(Debug, Clone, Serialize)]
pub struct Friend {
    pub id: String,
    pub user: User,
    pub track: Track,
    /// Unix milliseconds of the last activity.
    pub timestamp: i64,
}

impl PartialEq for Friend {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Friend {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub uri: String,
    pub name: String,
    pub image_url: Option<String>,
    /// Profile page.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub album: Album,
    pub artist: Artist,
    pub context: Context,
}

impl Track {
    /// Bare track id, as used by deep links.
    pub fn id(&self) -> Option<&str> {
        uri_id(&self.uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub uri: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub uri: String,
    pub name: String,
    pub url: String,
}

/// Where the track is playing from (playlist, album, artist radio...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub uri: String,
    pub name: String,
    pub index: i64,
    pub url: String,
}

impl Friend {
    pub(crate) fn from_wire(wire: WireFriend, urls: &UrlBuilder) -> Self {
        let user = User::from_wire(wire.user, urls);
        Self {
            id: user.uri.clone(),
            track: Track::from_wire(wire.track, urls),
            user,
            timestamp: wire.timestamp,
        }
    }
}

impl User {
    fn from_wire(wire: WireUser, urls: &UrlBuilder) -> Self {
        Self {
            url: urls.build_user(&wire.uri),
            image_url: wire.image_url.as_deref().and_then(normalize_image_url),
            uri: wire.uri,
            name: wire.name,
        }
    }
}

impl Track {
    fn from_wire(wire: WireTrack, urls: &UrlBuilder) -> Self {
        Self {
            url: urls.build(&wire.uri),
            image_url: wire.image_url.as_deref().and_then(normalize_image_url),
            album: Album::from_wire(wire.album, urls),
            artist: Artist::from_wire(wire.artist, urls),
            context: Context::from_wire(wire.context, urls),
            uri: wire.uri,
            name: wire.name,
        }
    }
}

impl Album {
    fn from_wire(wire: WireEntity, urls: &UrlBuilder) -> Self {
        Self {
            url: urls.build(&wire.uri),
            uri: wire.uri,
            name: wire.name,
        }
    }
}

impl Artist {
    fn from_wire(wire: WireEntity, urls: &UrlBuilder) -> Self {
        Self {
            url: urls.build(&wire.uri),
            uri: wire.uri,
            name: wire.name,
        }
    }
}

impl Context {
    fn from_wire(wire: WireContext, urls: &UrlBuilder) -> Self {
        Self {
            url: urls.build(&wire.uri),
            uri: wire.uri,
            name: wire.name,
            index: wire.index,
        }
    }
}
