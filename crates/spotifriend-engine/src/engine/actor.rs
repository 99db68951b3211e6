//! The engine task. Owns all mutable state; nothing here blocks on I/O
//! except the small session-store writes.

use std::sync::Arc;

use spotifriend_api::{FetchError, Friend};
use spotifriend_common::{NotificationSlot, PlatformError};
use spotifriend_platform::{find_session_cookie, BrowserCookie};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::classifier::{classify, Classification, LOGGED_OUT_MESSAGE};
use crate::guard::{FlightGuard, SingleFlight};
use crate::pipeline;
use crate::reachability::PathStatus;
use crate::state::{Snapshot, State};

use super::command::Command;
use super::{EngineDeps, EngineOptions, LoginOutcome};

pub(super) struct Actor {
    deps: EngineDeps,
    options: EngineOptions,
    state: State,
    /// State to fall back to if the running fetch is cancelled.
    resume_state: State,
    friends: Arc<Vec<Friend>>,
    notifications: NotificationSlot,
    flight: SingleFlight,
    /// Bumped whenever the session changes hands (logout, stored login).
    /// Fetch results from an older generation are dropped.
    generation: u64,
    /// A refresh was wanted while a stale fetch still held the flight.
    refresh_pending: bool,
    /// Refresh callers waiting for the running fetch to be applied.
    waiters: Vec<oneshot::Sender<()>>,
    self_tx: mpsc::WeakSender<Command>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl Actor {
    pub(super) fn new(
        deps: EngineDeps,
        options: EngineOptions,
        self_tx: mpsc::WeakSender<Command>,
        snapshot_tx: watch::Sender<Snapshot>,
    ) -> Self {
        let state = options.initial_state();
        Self {
            notifications: NotificationSlot::new(options.notification_ttl),
            resume_state: state.clone(),
            state,
            deps,
            options,
            friends: Arc::new(Vec::new()),
            flight: SingleFlight::new(),
            generation: 0,
            refresh_pending: false,
            waiters: Vec::new(),
            self_tx,
            snapshot_tx,
        }
    }

    pub(super) async fn run(mut self, mut command_rx: mpsc::Receiver<Command>) {
        info!(state = %self.state, model = ?self.options.state_model, "engine started");
        while let Some(command) = command_rx.recv().await {
            self.handle(command);
        }
        debug!("engine stopped: all handles dropped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Refresh { done } => {
                self.refresh("user", Some(done));
                self.publish();
            }
            Command::Logout { done } => {
                self.logout();
                self.publish();
                let _ = done.send(());
            }
            Command::CheckLoginStatus { done } => self.read_cookies(done),
            Command::CookiesRead { result, done } => {
                let outcome = self.apply_cookies(result);
                self.publish();
                let _ = done.send(outcome);
            }
            Command::Reachability { status, done } => {
                self.reachability_changed(status);
                self.publish();
                let _ = done.send(());
            }
            Command::PollTick { done } => {
                if self.state.accepts_automatic_refresh() {
                    self.refresh("poll", None);
                    self.publish();
                } else {
                    debug!(state = %self.state, "poll tick ignored");
                }
                let _ = done.send(());
            }
            Command::FetchCompleted {
                result,
                guard,
                generation,
            } => {
                self.apply_fetch(result, generation);
                drop(guard);
                // Waiters ride along with a restarted fetch.
                let restarted = std::mem::take(&mut self.refresh_pending)
                    && self.start_fetch("pending");
                self.publish();
                if !restarted {
                    for waiter in self.waiters.drain(..) {
                        let _ = waiter.send(());
                    }
                }
            }
            Command::NotificationExpired { created_at } => {
                if self.notifications.expire(created_at) {
                    self.publish();
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Fetching
    // -----------------------------------------------------------------------

    /// Start a fetch unless one is running. `done` is acknowledged when the
    /// result lands, or right away if nothing was started or deferred.
    fn refresh(&mut self, trigger: &'static str, done: Option<oneshot::Sender<()>>) {
        if self.start_fetch(trigger) || self.refresh_pending {
            self.waiters.extend(done);
        } else if let Some(done) = done {
            let _ = done.send(());
        }
    }

    fn start_fetch(&mut self, trigger: &'static str) -> bool {
        if self.state == State::Loading {
            debug!(trigger, "refresh skipped: already loading");
            return false;
        }
        if self.state == State::LoggedOut && !self.resume_stored_session() {
            debug!(trigger, "refresh skipped: logged out");
            return false;
        }
        let Some(guard) = self.flight.try_acquire() else {
            // Only a fetch from an older session can hold the flight here.
            debug!(trigger, "refresh deferred: stale fetch in flight");
            self.refresh_pending = true;
            return false;
        };

        if self.state == State::Initial {
            self.set_state(State::Idle);
        }
        self.resume_state = self.state.clone();
        self.set_state(State::Loading);
        debug!(trigger, "fetch started");
        self.spawn_fetch(guard);
        true
    }

    /// Run the pipeline in its own task so a panic there cannot take the
    /// engine down. The guard rides back with the result and is released
    /// only after the result is applied.
    fn spawn_fetch(&self, guard: FlightGuard) {
        let generation = self.generation;
        let session = self.deps.session.clone();
        let source = Arc::clone(&self.deps.source);
        let self_tx = self.self_tx.clone();

        tokio::spawn(async move {
            let fetch = tokio::spawn(async move {
                pipeline::fetch_friend_list(&session, source.as_ref()).await
            });
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Err(FetchError::Cancelled),
                Err(e) => {
                    error!(error = %e, "fetch task panicked");
                    Err(FetchError::Transport("fetch task panicked".into()))
                }
            };
            if let Some(tx) = self_tx.upgrade() {
                let _ = tx
                    .send(Command::FetchCompleted {
                        result,
                        guard,
                        generation,
                    })
                    .await;
            }
        });
    }

    fn apply_fetch(&mut self, result: Result<Vec<Friend>, FetchError>, generation: u64) {
        if generation != self.generation {
            debug!(
                fetched = generation,
                current = self.generation,
                "discarding fetch result from an older session"
            );
            return;
        }
        match result {
            Ok(friends) => {
                info!(count = friends.len(), "friend list updated");
                self.friends = Arc::new(friends);
                self.set_state(State::Loaded);
            }
            Err(error) => self.handle_error(error),
        }
    }

    fn handle_error(&mut self, error: FetchError) {
        match classify(&error) {
            Classification::Logout => {
                warn!(error = %error, "session rejected");
                self.logout();
            }
            Classification::Report(message) => {
                warn!(error = %error, "fetch failed");
                self.set_state(State::Error(message.clone()));
                self.notify(message);
            }
            Classification::Suppress => {
                debug!("fetch cancelled");
                if self.state == State::Loading {
                    let resume = self.resume_state.clone();
                    self.set_state(resume);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    fn logout(&mut self) {
        if let Err(e) = self.deps.session.clear() {
            warn!(error = %e, "failed to clear session cookie");
        }
        self.generation += 1;
        self.set_state(State::LoggedOut);
        self.notify(LOGGED_OUT_MESSAGE);
    }

    fn read_cookies(&self, done: oneshot::Sender<LoginOutcome>) {
        let Some(source) = self.deps.cookies.clone() else {
            warn!("login check requested but no cookie source is configured");
            let _ = done.send(LoginOutcome::NoSessionCookie);
            return;
        };
        let settle = self.options.login_settle;
        let self_tx = self.self_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            let result = source.cookies().await;
            if let Some(tx) = self_tx.upgrade() {
                let _ = tx.send(Command::CookiesRead { result, done }).await;
            }
        });
    }

    fn apply_cookies(&mut self, result: Result<Vec<BrowserCookie>, PlatformError>) -> LoginOutcome {
        let cookies = match result {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!(error = %e, "failed to read login cookies");
                return LoginOutcome::Failed(e.to_string());
            }
        };

        let now = chrono::Utc::now().timestamp();
        let Some(cookie) = find_session_cookie(&cookies, now) else {
            info!(checked = cookies.len(), "no session cookie found");
            return LoginOutcome::NoSessionCookie;
        };
        if let Err(e) = self.deps.session.set_cookie(&cookie.value) {
            warn!(error = %e, "failed to store session cookie");
            return LoginOutcome::Failed(e.to_string());
        }

        info!("session cookie stored");
        self.generation += 1;
        self.set_state(State::Idle);
        self.refresh("login", None);
        LoginOutcome::LoggedIn
    }

    /// Leave `LoggedOut` if a session cookie has appeared in the store,
    /// e.g. written by `spotifriend login` from another process.
    fn resume_stored_session(&mut self) -> bool {
        match self.deps.session.cookie() {
            Ok(Some(_)) => {
                info!("stored session cookie found");
                self.generation += 1;
                self.set_state(State::Idle);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to read session cookie");
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reachability and notifications
    // -----------------------------------------------------------------------

    fn reachability_changed(&mut self, status: PathStatus) {
        if self.state == State::Initial {
            debug!(?status, "reachability ignored before first use");
            return;
        }
        match status {
            PathStatus::Satisfied => {
                self.refresh("reachability", None);
            }
            PathStatus::Unsatisfied if self.state != State::LoggedOut => {
                self.set_state(State::Offline);
            }
            PathStatus::Unsatisfied => {}
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        let created_at = self.notifications.show(message);
        let ttl = self.notifications.ttl();
        let self_tx = self.self_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(tx) = self_tx.upgrade() {
                let _ = tx.send(Command::NotificationExpired { created_at }).await;
            }
        });
    }

    fn set_state(&mut self, next: State) {
        if self.state != next {
            info!(from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(Snapshot {
            state: self.state.clone(),
            friends: Arc::clone(&self.friends),
            notification: self.notifications.current().cloned(),
        });
    }
}
