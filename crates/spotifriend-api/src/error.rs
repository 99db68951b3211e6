//! Failure taxonomy for one fetch cycle.

/// Failures that end the user's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("session is no longer authorized")]
    Unauthorized,
    #[error("no session cookie stored")]
    NoCookie,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Too many requests")]
    RateLimited,

    /// The request was superseded or aborted before it finished.
    #[error("request cancelled")]
    Cancelled,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Auth(_))
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
