//! The engine actor and its handle.

mod actor;
mod command;
mod handle;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use spotifriend_api::FriendSource;
use spotifriend_common::DEFAULT_NOTIFICATION_TTL;
use spotifriend_config::schema::StateModel;
use spotifriend_config::SpotifriendConfig;
use spotifriend_platform::{CookieSource, SessionStore};
use tokio::sync::{mpsc, watch};

use crate::state::{Snapshot, State};

use actor::Actor;

pub use handle::EngineHandle;

/// Collaborators the engine talks to.
#[derive(Clone)]
pub struct EngineDeps {
    pub source: Arc<dyn FriendSource>,
    pub session: SessionStore,
    /// Consulted by `check_login_status`. Without one, login checks never
    /// find a cookie.
    pub cookies: Option<Arc<dyn CookieSource>>,
}

/// Tunables, normally taken from [`SpotifriendConfig`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub state_model: StateModel,
    /// Whether this is the first launch on this device.
    pub first_launch: bool,
    pub notification_ttl: Duration,
    /// Delay before reading cookies after a login flow closes.
    pub login_settle: Duration,
}

impl EngineOptions {
    pub fn from_config(config: &SpotifriendConfig, first_launch: bool) -> Self {
        Self {
            state_model: config.engine.state_model,
            first_launch,
            notification_ttl: Duration::from_millis(u64::from(config.notifications.ttl_ms)),
            login_settle: Duration::from_millis(u64::from(config.polling.login_settle_ms)),
        }
    }

    fn initial_state(&self) -> State {
        match self.state_model {
            StateModel::FirstLaunchAware if self.first_launch => State::Initial,
            _ => State::Idle,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            state_model: StateModel::default(),
            first_launch: false,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            login_settle: Duration::from_secs(1),
        }
    }
}

/// Result of [`EngineHandle::check_login_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A session cookie was found and stored; a refresh is under way.
    LoggedIn,
    /// The cookie source had no usable session cookie.
    NoSessionCookie,
    /// The cookie source or the store failed.
    Failed(String),
}

/// Returned by handle methods once the engine task has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine stopped")]
pub struct EngineStopped;

pub struct Engine;

impl Engine {
    /// Start the engine on the current runtime.
    pub fn spawn(deps: EngineDeps, options: EngineOptions) -> EngineHandle {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::new(options.initial_state()));

        let actor = Actor::new(deps, options, command_tx.downgrade(), snapshot_tx);
        tokio::spawn(actor.run(command_rx));

        EngineHandle::new(command_tx, snapshot_rx)
    }
}
