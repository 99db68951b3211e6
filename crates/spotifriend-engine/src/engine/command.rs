use spotifriend_api::{FetchError, Friend};
use spotifriend_common::PlatformError;
use spotifriend_platform::BrowserCookie;
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::guard::FlightGuard;
use crate::reachability::PathStatus;

use super::LoginOutcome;

/// Messages processed by the engine task, one at a time.
pub(super) enum Command {
    /// Acknowledged once the fetch it started has been applied, or right
    /// away if it did not start one.
    Refresh { done: oneshot::Sender<()> },
    Logout { done: oneshot::Sender<()> },
    CheckLoginStatus { done: oneshot::Sender<LoginOutcome> },
    Reachability {
        status: PathStatus,
        done: oneshot::Sender<()>,
    },
    PollTick { done: oneshot::Sender<()> },

    // Internal, posted by tasks the engine spawned.
    FetchCompleted {
        result: Result<Vec<Friend>, FetchError>,
        guard: FlightGuard,
        /// Session generation the fetch was started under.
        generation: u64,
    },
    CookiesRead {
        result: Result<Vec<BrowserCookie>, PlatformError>,
        done: oneshot::Sender<LoginOutcome>,
    },
    NotificationExpired { created_at: Instant },
}
