//! Maps fetch failures to engine reactions.

use spotifriend_api::FetchError;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Try again later.";
pub const LOGGED_OUT_MESSAGE: &str = "Logged out.";

/// What the engine should do about a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The session is gone: clear the cookie and go to `LoggedOut`.
    Logout,
    /// Enter `Error` with this message and show it as a notification.
    Report(String),
    /// Ignore; the request was cancelled on purpose.
    Suppress,
}

pub fn classify(error: &FetchError) -> Classification {
    if error.is_auth() {
        Classification::Logout
    } else if error.is_rate_limited() {
        Classification::Report(RATE_LIMITED_MESSAGE.to_string())
    } else if error.is_cancelled() {
        Classification::Suppress
    } else {
        Classification::Report(format!("Error: {error}"))
    }
}
