//! Home-screen widget timeline.
//!
//! The widget runs outside the engine: it reads the shared session store
//! and fetches on its own schedule.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use spotifriend_api::{format_timestamp, Friend, FriendSource, RelativeTime};
use spotifriend_config::schema::{WidgetConfig, WidgetFamily};
use spotifriend_platform::SessionStore;
use tracing::{info, warn};

use crate::deeplink::play_link;
use crate::pipeline;

pub const EMPTY_MESSAGE: &str = "No friends currently listening.";

/// One friend as the widget draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetRow {
    pub user_name: String,
    pub image_url: Option<String>,
    /// `<track> • <artist>`
    pub track_line: String,
    pub last_active: RelativeTime,
    /// `app-widget://play?id=<trackId>`, when the track has an id.
    pub play_link: Option<String>,
}

impl WidgetRow {
    pub fn from_friend(friend: &Friend, now_ms: i64) -> Self {
        Self {
            user_name: friend.user.name.clone(),
            image_url: friend.user.image_url.clone(),
            track_line: format!("{} • {}", friend.track.name, friend.track.artist.name),
            last_active: format_timestamp(friend.timestamp, now_ms),
            play_link: friend.track.id().map(play_link),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetEntry {
    pub date: DateTime<Utc>,
    /// Empty when the fetch failed or nobody is listening.
    pub rows: Vec<WidgetRow>,
}

/// An entry plus when the host should ask again.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub entry: WidgetEntry,
    pub next_refresh: Duration,
}

impl Timeline {
    pub fn next_refresh_at(&self) -> DateTime<Utc> {
        let step = chrono::Duration::from_std(self.next_refresh).unwrap_or(chrono::Duration::zero());
        self.entry.date + step
    }
}

pub struct TimelineProvider {
    source: Arc<dyn FriendSource>,
    session: SessionStore,
    family: WidgetFamily,
    refresh: Duration,
    retry: Duration,
}

impl TimelineProvider {
    pub fn new(source: Arc<dyn FriendSource>, session: SessionStore, config: &WidgetConfig) -> Self {
        Self {
            source,
            session,
            family: config.family,
            refresh: Duration::from_secs(u64::from(config.refresh_minutes) * 60),
            retry: Duration::from_secs(u64::from(config.retry_minutes) * 60),
        }
    }

    pub fn with_family(mut self, family: WidgetFamily) -> Self {
        self.family = family;
        self
    }

    /// Fetch once and build the next timeline. Failures produce an empty
    /// entry and a shorter retry.
    pub async fn timeline(&self) -> Timeline {
        let now = Utc::now();
        match pipeline::fetch_friend_list(&self.session, self.source.as_ref()).await {
            Ok(friends) => {
                let rows = project(&friends, self.family, now.timestamp_millis());
                info!(rows = rows.len(), "widget timeline refreshed");
                Timeline {
                    entry: WidgetEntry { date: now, rows },
                    next_refresh: self.refresh,
                }
            }
            Err(e) => {
                warn!(error = %e, "widget fetch failed");
                Timeline {
                    entry: WidgetEntry {
                        date: now,
                        rows: Vec::new(),
                    },
                    next_refresh: self.retry,
                }
            }
        }
    }
}

/// The first `family.capacity()` friends as widget rows.
pub fn project(friends: &[Friend], family: WidgetFamily, now_ms: i64) -> Vec<WidgetRow> {
    friends
        .iter()
        .take(family.capacity())
        .map(|f| WidgetRow::from_friend(f, now_ms))
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use spotifriend_api::{Album, Artist, Context, FetchError, Track, User};
    use spotifriend_platform::MemoryStore;

    use super::*;

    fn friend(n: usize, timestamp: i64) -> Friend {
        let entity = |kind: &str| (format!("spotify:{kind}:{kind}{n}"), format!("{kind} {n}"));
        let (track_uri, track_name) = entity("track");
        let (artist_uri, artist_name) = entity("artist");
        let (album_uri, album_name) = entity("album");
        Friend {
            id: format!("spotify:user:u{n}"),
            user: User {
                uri: format!("spotify:user:u{n}"),
                name: format!("User {n}"),
                image_url: None,
                url: String::new(),
            },
            track: Track {
                uri: track_uri,
                name: track_name,
                url: String::new(),
                image_url: None,
                album: Album {
                    uri: album_uri.clone(),
                    name: album_name.clone(),
                    url: String::new(),
                },
                artist: Artist {
                    uri: artist_uri,
                    name: artist_name,
                    url: String::new(),
                },
                context: Context {
                    uri: album_uri,
                    name: album_name,
                    index: 0,
                    url: String::new(),
                },
            },
            timestamp,
        }
    }

    struct Fixed(Result<Vec<Friend>, FetchError>);

    #[async_trait]
    impl FriendSource for Fixed {
        async fn fetch_friend_list(&self, _cookie: &str) -> Result<Vec<Friend>, FetchError> {
            self.0.clone()
        }
    }

    fn provider(source: Fixed, cookie: Option<&str>) -> TimelineProvider {
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        if let Some(cookie) = cookie {
            session.set_cookie(cookie).unwrap();
        }
        TimelineProvider::new(Arc::new(source), session, &WidgetConfig::default())
    }

    #[test]
    fn row_fields() {
        let row = WidgetRow::from_friend(&friend(1, 0), 10 * 60_000);
        assert_eq!(row.user_name, "User 1");
        assert_eq!(row.track_line, "track 1 • artist 1");
        assert_eq!(row.last_active.display, "10m");
        assert_eq!(row.play_link.as_deref(), Some("app-widget://play?id=track1"));
    }

    #[test]
    fn capacity_follows_family() {
        let friends: Vec<_> = (0..6).map(|n| friend(n, 0)).collect();
        assert_eq!(project(&friends, WidgetFamily::Medium, 0).len(), 2);
        let large = project(&friends, WidgetFamily::Large, 0);
        assert_eq!(large.len(), 4);
        assert_eq!(large[0].user_name, "User 0");
        assert_eq!(project(&friends[..1], WidgetFamily::Large, 0).len(), 1);
    }

    #[tokio::test]
    async fn success_schedules_regular_refresh() {
        let p = provider(Fixed(Ok(vec![friend(1, 0), friend(2, 0), friend(3, 0)])), Some("c"));
        let timeline = p.timeline().await;
        assert_eq!(timeline.entry.rows.len(), 2);
        assert_eq!(timeline.next_refresh, Duration::from_secs(15 * 60));
    }

    #[tokio::test]
    async fn failure_yields_empty_entry_and_retry() {
        let p = provider(Fixed(Err(FetchError::Status(503))), Some("c"));
        let timeline = p.timeline().await;
        assert!(timeline.entry.rows.is_empty());
        assert_eq!(timeline.next_refresh, Duration::from_secs(5 * 60));
    }

    #[tokio::test]
    async fn missing_cookie_is_a_failure() {
        let p = provider(Fixed(Ok(vec![friend(1, 0)])), None);
        let timeline = p.timeline().await;
        assert!(timeline.entry.rows.is_empty());
        assert_eq!(timeline.next_refresh, Duration::from_secs(5 * 60));
    }

    #[test]
    fn entry_serializes_for_the_host() {
        use chrono::TimeZone;
        let entry = WidgetEntry {
            date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            rows: project(&[friend(1, 0)], WidgetFamily::Medium, 0),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-02T03:04:05Z");
        assert_eq!(json["rows"][0]["user_name"], "User 1");
        assert_eq!(json["rows"][0]["last_active"]["display"], "now");
        assert_eq!(json["rows"][0]["play_link"], "app-widget://play?id=track1");
    }

    #[test]
    fn next_refresh_at_adds_delay() {
        let date = Utc::now();
        let timeline = Timeline {
            entry: WidgetEntry {
                date,
                rows: Vec::new(),
            },
            next_refresh: Duration::from_secs(300),
        };
        assert_eq!(timeline.next_refresh_at() - date, chrono::Duration::seconds(300));
    }
}
