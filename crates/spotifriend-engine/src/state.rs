//! Connection state and the published view of the engine.

use std::fmt;
use std::sync::Arc;

use spotifriend_api::Friend;
use spotifriend_common::Notification;

/// Where the engine is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// First launch; nothing has happened yet. Reachability is ignored here.
    Initial,
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed; carries the user-facing message.
    Error(String),
    Offline,
    LoggedOut,
}

impl State {
    /// Whether poll ticks and reachability recovery may start a fetch.
    ///
    /// `LoggedOut` accepts them: the fetch only starts if another process
    /// has stored a session cookie in the meantime.
    pub fn accepts_automatic_refresh(&self) -> bool {
        !matches!(self, State::Initial)
    }

    pub fn label(&self) -> &'static str {
        match self {
            State::Initial => "initial",
            State::Idle => "idle",
            State::Loading => "loading",
            State::Loaded => "loaded",
            State::Error(_) => "error",
            State::Offline => "offline",
            State::LoggedOut => "logged_out",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Error(message) => write!(f, "error: {message}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Everything an observer needs to render the current view.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: State,
    /// Last successfully fetched list. Survives later failures.
    pub friends: Arc<Vec<Friend>>,
    pub notification: Option<Notification>,
}

impl Snapshot {
    pub(crate) fn new(state: State) -> Self {
        Self {
            state,
            friends: Arc::new(Vec::new()),
            notification: None,
        }
    }
}
