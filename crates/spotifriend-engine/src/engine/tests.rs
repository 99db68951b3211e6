use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use spotifriend_api::{
    Album, Artist, AuthError, Context, FetchError, Friend, FriendSource, Track, User,
};
use spotifriend_config::schema::StateModel;
use spotifriend_platform::{CookieSource, MemoryStore, SessionStore, StaticCookieSource};
use tokio::sync::{mpsc, Notify};
use tokio::time::sleep;

use super::*;
use crate::classifier::{LOGGED_OUT_MESSAGE, RATE_LIMITED_MESSAGE};
use crate::reachability::{forward_reachability, PathStatus};
use crate::scheduler::spawn_poll_scheduler;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

fn friend(n: u32) -> Friend {
    let entity = |kind: &str| format!("spotify:{kind}:{n}");
    Friend {
        id: entity("user"),
        user: User {
            uri: entity("user"),
            name: format!("Friend {n}"),
            image_url: None,
            url: String::new(),
        },
        track: Track {
            uri: entity("track"),
            name: format!("Song {n}"),
            url: String::new(),
            image_url: None,
            album: Album {
                uri: entity("album"),
                name: String::new(),
                url: String::new(),
            },
            artist: Artist {
                uri: entity("artist"),
                name: String::new(),
                url: String::new(),
            },
            context: Context {
                uri: entity("album"),
                name: String::new(),
                index: 0,
                url: String::new(),
            },
        },
        timestamp: i64::from(n),
    }
}

/// Replays scripted results, then empty lists. Can be held open until
/// released, or made to panic once.
#[derive(Default)]
struct FakeSource {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<Vec<Friend>, FetchError>>>,
    last_cookie: Mutex<Option<String>>,
    hold: AtomicBool,
    release: Notify,
    panic_next: AtomicBool,
}

impl FakeSource {
    fn scripted(results: Vec<Result<Vec<Friend>, FetchError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Self::default()
        }
    }

    fn held() -> Self {
        let source = Self::scripted(vec![Ok(vec![friend(1)])]);
        source.hold.store(true, Ordering::SeqCst);
        source
    }

    fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FriendSource for FakeSource {
    async fn fetch_friend_list(&self, cookie: &str) -> Result<Vec<Friend>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_cookie.lock().unwrap() = Some(cookie.to_string());
        if self.hold.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("source exploded");
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

struct Harness {
    engine: EngineHandle,
    source: Arc<FakeSource>,
    session: SessionStore,
}

fn start(
    source: FakeSource,
    cookie: Option<&str>,
    cookies: Option<Arc<dyn CookieSource>>,
    options: EngineOptions,
) -> Harness {
    let source = Arc::new(source);
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    if let Some(cookie) = cookie {
        session.set_cookie(cookie).unwrap();
    }
    let engine = Engine::spawn(
        EngineDeps {
            source: source.clone(),
            session: session.clone(),
            cookies,
        },
        options,
    );
    Harness {
        engine,
        source,
        session,
    }
}

fn logged_in(source: FakeSource) -> Harness {
    start(source, Some("cookie"), None, EngineOptions::default())
}

impl Harness {
    fn state(&self) -> State {
        self.engine.snapshot().state
    }

    fn notification(&self) -> Option<String> {
        self.engine.snapshot().notification.map(|n| n.message)
    }

    /// Start a refresh in the background and wait until it is loading.
    async fn refresh_in_background(&self) -> tokio::task::JoinHandle<Result<(), EngineStopped>> {
        let engine = self.engine.clone();
        let task = tokio::spawn(async move { engine.refresh().await });
        self.engine
            .subscribe()
            .wait_for(|s| s.state == State::Loading)
            .await
            .unwrap();
        task
    }

    /// Wait until the source has been called `n` times.
    async fn source_called(&self, n: usize) {
        while self.source.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_publishes_friends() {
    let h = logged_in(FakeSource::scripted(vec![Ok(vec![friend(1), friend(2)])]));
    assert_eq!(h.state(), State::Idle);

    h.engine.refresh().await.unwrap();

    let snapshot = h.engine.snapshot();
    assert_eq!(snapshot.state, State::Loaded);
    assert_eq!(snapshot.friends.len(), 2);
    assert!(snapshot.notification.is_none());
    assert_eq!(h.source.last_cookie.lock().unwrap().as_deref(), Some("cookie"));
}

#[tokio::test]
async fn overlapping_triggers_share_one_fetch() {
    let h = logged_in(FakeSource::held());
    let first = h.refresh_in_background().await;

    h.engine.refresh().await.unwrap();
    h.engine.poll_tick().await.unwrap();
    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    assert_eq!(h.state(), State::Loading);

    h.source.release();
    first.await.unwrap().unwrap();

    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.state(), State::Loaded);
}

#[tokio::test]
async fn failure_keeps_last_good_list() {
    let h = logged_in(FakeSource::scripted(vec![
        Ok(vec![friend(1), friend(2)]),
        Err(FetchError::Status(500)),
    ]));
    h.engine.refresh().await.unwrap();
    h.engine.refresh().await.unwrap();

    let snapshot = h.engine.snapshot();
    let State::Error(message) = snapshot.state else {
        panic!("expected error state, got {:?}", snapshot.state);
    };
    assert!(message.starts_with("Error: "));
    assert_eq!(snapshot.friends.len(), 2);
    assert_eq!(snapshot.notification.unwrap().message, message);
}

#[tokio::test]
async fn unauthorized_logs_out_and_clears_cookie() {
    let h = logged_in(FakeSource::scripted(vec![
        Ok(vec![friend(1)]),
        Err(AuthError::Unauthorized.into()),
    ]));
    h.engine.refresh().await.unwrap();
    h.engine.refresh().await.unwrap();

    assert_eq!(h.state(), State::LoggedOut);
    assert_eq!(h.session.cookie().unwrap(), None);
    assert_eq!(h.notification().as_deref(), Some(LOGGED_OUT_MESSAGE));
    assert_eq!(h.engine.snapshot().friends.len(), 1);
}

#[tokio::test]
async fn missing_cookie_logs_out_without_network() {
    let h = start(FakeSource::default(), None, None, EngineOptions::default());
    h.engine.refresh().await.unwrap();

    assert_eq!(h.state(), State::LoggedOut);
    assert_eq!(h.source.calls(), 0);
    assert_eq!(h.notification().as_deref(), Some("Logged out."));
}

#[tokio::test]
async fn rate_limit_keeps_session() {
    let h = logged_in(FakeSource::scripted(vec![Err(FetchError::RateLimited)]));
    h.engine.refresh().await.unwrap();

    assert_eq!(h.state(), State::Error(RATE_LIMITED_MESSAGE.into()));
    assert_eq!(h.notification().as_deref(), Some(RATE_LIMITED_MESSAGE));
    assert_eq!(h.session.cookie().unwrap().as_deref(), Some("cookie"));
}

#[tokio::test]
async fn cancelled_fetch_is_silent() {
    let h = logged_in(FakeSource::scripted(vec![
        Ok(vec![friend(1)]),
        Err(FetchError::Cancelled),
    ]));
    h.engine.refresh().await.unwrap();
    h.engine.refresh().await.unwrap();

    assert_eq!(h.state(), State::Loaded);
    assert!(h.notification().is_none());
}

#[tokio::test]
async fn panicking_fetch_releases_the_flight() {
    let h = logged_in(FakeSource::scripted(vec![Ok(vec![friend(1)])]));
    h.source.panic_next.store(true, Ordering::SeqCst);

    h.engine.refresh().await.unwrap();
    assert_eq!(h.state(), State::Error("Error: fetch task panicked".into()));

    h.engine.refresh().await.unwrap();
    assert_eq!(h.state(), State::Loaded);
    assert_eq!(h.source.calls(), 2);
}

#[tokio::test]
async fn logout_during_fetch_discards_result() {
    let h = logged_in(FakeSource::held());
    let first = h.refresh_in_background().await;

    h.engine.logout().await.unwrap();
    h.source.release();
    first.await.unwrap().unwrap();

    let snapshot = h.engine.snapshot();
    assert_eq!(snapshot.state, State::LoggedOut);
    assert!(snapshot.friends.is_empty());
}

#[tokio::test]
async fn explicit_refresh_is_ignored_when_logged_out() {
    let h = logged_in(FakeSource::default());
    h.engine.logout().await.unwrap();
    h.engine.refresh().await.unwrap();

    assert_eq!(h.state(), State::LoggedOut);
    assert_eq!(h.source.calls(), 0);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn notification_expires_after_ttl() {
    let h = logged_in(FakeSource::default());
    h.engine.logout().await.unwrap();

    sleep(Duration::from_secs(1)).await;
    assert_eq!(h.notification().as_deref(), Some(LOGGED_OUT_MESSAGE));

    sleep(Duration::from_millis(2100)).await;
    assert!(h.notification().is_none());
}

#[tokio::test(start_paused = true)]
async fn stale_timer_does_not_clear_newer_notification() {
    let h = logged_in(FakeSource::scripted(vec![
        Err(FetchError::RateLimited),
        Err(FetchError::Status(502)),
    ]));
    h.engine.refresh().await.unwrap();
    sleep(Duration::from_secs(2)).await;
    h.engine.refresh().await.unwrap();
    let second = h.notification().unwrap();
    assert!(second.starts_with("Error: "));

    sleep(Duration::from_millis(1100)).await;
    assert_eq!(h.notification(), Some(second));

    sleep(Duration::from_secs(2)).await;
    assert!(h.notification().is_none());
}

// ---------------------------------------------------------------------------
// Reachability and state models
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offline_mid_flight_still_applies_result() {
    let h = logged_in(FakeSource::held());
    let first = h.refresh_in_background().await;

    h.engine
        .reachability_changed(PathStatus::Unsatisfied)
        .await
        .unwrap();
    assert_eq!(h.state(), State::Offline);

    h.source.release();
    first.await.unwrap().unwrap();
    assert_eq!(h.state(), State::Loaded);
}

#[tokio::test]
async fn network_recovery_refreshes() {
    let h = logged_in(FakeSource::default());
    h.engine
        .reachability_changed(PathStatus::Unsatisfied)
        .await
        .unwrap();
    assert_eq!(h.state(), State::Offline);

    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    let snapshot = h.engine.settled().await.unwrap();
    assert_eq!(snapshot.state, State::Loaded);
    assert_eq!(h.source.calls(), 1);
}

#[tokio::test]
async fn logged_out_ignores_network_and_polls() {
    let h = logged_in(FakeSource::default());
    h.engine.logout().await.unwrap();

    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    h.engine
        .reachability_changed(PathStatus::Unsatisfied)
        .await
        .unwrap();
    h.engine.poll_tick().await.unwrap();

    assert_eq!(h.state(), State::LoggedOut);
    assert_eq!(h.source.calls(), 0);
}

#[tokio::test]
async fn first_launch_waits_for_the_user() {
    let options = EngineOptions {
        first_launch: true,
        ..EngineOptions::default()
    };
    let h = start(FakeSource::default(), Some("cookie"), None, options);
    assert_eq!(h.state(), State::Initial);

    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    h.engine
        .reachability_changed(PathStatus::Unsatisfied)
        .await
        .unwrap();
    h.engine.poll_tick().await.unwrap();
    assert_eq!(h.state(), State::Initial);
    assert_eq!(h.source.calls(), 0);

    h.engine.refresh().await.unwrap();
    assert_eq!(h.state(), State::Loaded);

    h.engine
        .reachability_changed(PathStatus::Unsatisfied)
        .await
        .unwrap();
    assert_eq!(h.state(), State::Offline);
}

#[tokio::test]
async fn collapsed_model_starts_idle_and_follows_network() {
    let options = EngineOptions {
        state_model: StateModel::Collapsed,
        first_launch: true,
        ..EngineOptions::default()
    };
    let h = start(FakeSource::default(), Some("cookie"), None, options);
    assert_eq!(h.state(), State::Idle);

    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    assert_eq!(h.engine.settled().await.unwrap().state, State::Loaded);
    assert_eq!(h.source.calls(), 1);
}

#[tokio::test]
async fn forwarded_statuses_reach_the_engine() {
    let h = logged_in(FakeSource::default());
    let (tx, rx) = mpsc::channel(4);
    forward_reachability(rx, h.engine.clone());

    tx.send(PathStatus::Unsatisfied).await.unwrap();
    h.engine
        .subscribe()
        .wait_for(|s| s.state == State::Offline)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn login_stores_cookie_and_refreshes() {
    let cookies: Arc<dyn CookieSource> = Arc::new(StaticCookieSource::session("fresh"));
    let h = start(
        FakeSource::scripted(vec![Ok(vec![friend(7)])]),
        None,
        Some(cookies),
        EngineOptions::default(),
    );
    h.engine.logout().await.unwrap();

    let outcome = h.engine.check_login_status().await.unwrap();
    assert_eq!(outcome, LoginOutcome::LoggedIn);
    assert_eq!(h.session.cookie().unwrap().as_deref(), Some("fresh"));

    let snapshot = h.engine.settled().await.unwrap();
    assert_eq!(snapshot.state, State::Loaded);
    assert_eq!(snapshot.friends.len(), 1);
    assert_eq!(h.source.last_cookie.lock().unwrap().as_deref(), Some("fresh"));
}

#[tokio::test(start_paused = true)]
async fn login_without_session_cookie_changes_nothing() {
    let cookies: Arc<dyn CookieSource> = Arc::new(StaticCookieSource::new(Vec::new()));
    let h = start(FakeSource::default(), None, Some(cookies), EngineOptions::default());
    h.engine.logout().await.unwrap();

    let outcome = h.engine.check_login_status().await.unwrap();
    assert_eq!(outcome, LoginOutcome::NoSessionCookie);
    assert_eq!(h.state(), State::LoggedOut);
    assert_eq!(h.source.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn login_during_stale_fetch_keeps_new_cookie() {
    let source = FakeSource::scripted(vec![
        Err(AuthError::Unauthorized.into()),
        Ok(vec![friend(2)]),
    ]);
    source.hold.store(true, Ordering::SeqCst);
    let cookies: Arc<dyn CookieSource> = Arc::new(StaticCookieSource::session("fresh"));
    let h = start(source, Some("stale"), Some(cookies), EngineOptions::default());
    let first = h.refresh_in_background().await;
    h.source_called(1).await;

    h.engine.logout().await.unwrap();
    let outcome = h.engine.check_login_status().await.unwrap();
    assert_eq!(outcome, LoginOutcome::LoggedIn);
    assert_eq!(h.state(), State::Idle);

    h.source.release();
    first.await.unwrap().unwrap();

    let snapshot = h.engine.settled().await.unwrap();
    assert_eq!(snapshot.state, State::Loaded);
    assert_eq!(snapshot.friends.len(), 1);
    assert_eq!(h.session.cookie().unwrap().as_deref(), Some("fresh"));
    assert_eq!(h.source.calls(), 2);
    assert_eq!(h.source.last_cookie.lock().unwrap().as_deref(), Some("fresh"));
}

#[tokio::test(start_paused = true)]
async fn relogin_mid_fetch_drops_old_session_data() {
    let source = FakeSource::scripted(vec![
        Ok(vec![friend(1)]),
        Ok(vec![friend(2), friend(3)]),
    ]);
    source.hold.store(true, Ordering::SeqCst);
    let cookies: Arc<dyn CookieSource> = Arc::new(StaticCookieSource::session("fresh"));
    let h = start(source, Some("stale"), Some(cookies), EngineOptions::default());
    let first = h.refresh_in_background().await;
    h.source_called(1).await;

    let outcome = h.engine.check_login_status().await.unwrap();
    assert_eq!(outcome, LoginOutcome::LoggedIn);

    h.source.release();
    first.await.unwrap().unwrap();

    let snapshot = h.engine.settled().await.unwrap();
    assert_eq!(snapshot.state, State::Loaded);
    let names: Vec<_> = snapshot.friends.iter().map(|f| f.user.name.as_str()).collect();
    assert_eq!(names, ["Friend 2", "Friend 3"]);
    assert_eq!(h.source.last_cookie.lock().unwrap().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn poll_picks_up_cookie_stored_elsewhere() {
    let h = start(FakeSource::default(), None, None, EngineOptions::default());
    h.engine.refresh().await.unwrap();
    assert_eq!(h.state(), State::LoggedOut);

    h.session.set_cookie("from-login-command").unwrap();
    h.engine.poll_tick().await.unwrap();

    let snapshot = h.engine.settled().await.unwrap();
    assert_eq!(snapshot.state, State::Loaded);
    assert_eq!(h.source.calls(), 1);
    assert_eq!(
        h.source.last_cookie.lock().unwrap().as_deref(),
        Some("from-login-command")
    );
}

#[tokio::test(start_paused = true)]
async fn running_engine_recovers_from_logout_via_scheduler() {
    let h = start(FakeSource::default(), None, None, EngineOptions::default());
    h.engine.refresh().await.unwrap();
    assert_eq!(h.state(), State::LoggedOut);

    h.engine
        .reachability_changed(PathStatus::Satisfied)
        .await
        .unwrap();
    assert_eq!(h.state(), State::LoggedOut);

    h.session.set_cookie("later").unwrap();
    let scheduler = spawn_poll_scheduler(h.engine.clone(), Duration::from_secs(30));
    sleep(Duration::from_secs(31)).await;

    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.state(), State::Loaded);
    scheduler.abort();
}

#[tokio::test]
async fn login_without_cookie_source() {
    let h = start(FakeSource::default(), None, None, EngineOptions::default());
    let outcome = h.engine.check_login_status().await.unwrap();
    assert_eq!(outcome, LoginOutcome::NoSessionCookie);
}

// ---------------------------------------------------------------------------
// Poll scheduler
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn poll_scheduler_ticks_every_period() {
    let h = logged_in(FakeSource::default());
    let scheduler = spawn_poll_scheduler(h.engine.clone(), Duration::from_secs(30));

    sleep(Duration::from_secs(29)).await;
    assert_eq!(h.source.calls(), 0);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.state(), State::Loaded);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(h.source.calls(), 2);

    scheduler.abort();
}
