//! Public handle for driving the engine.

use tokio::sync::{mpsc, oneshot, watch};

use crate::reachability::PathStatus;
use crate::state::{Snapshot, State};

use super::command::Command;
use super::{EngineStopped, LoginOutcome};

/// Cheap to clone. Every method queues a command on the engine task and
/// waits for it to be handled.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl EngineHandle {
    pub(super) fn new(
        command_tx: mpsc::Sender<Command>,
        snapshot_rx: watch::Receiver<Snapshot>,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
        }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, EngineStopped> {
        let (done, rx) = oneshot::channel();
        self.command_tx
            .send(make(done))
            .await
            .map_err(|_| EngineStopped)?;
        rx.await.map_err(|_| EngineStopped)
    }

    /// Fetch the friend list unless a fetch is already running.
    ///
    /// Resolves once the result has been applied, or immediately when the
    /// call was a no-op.
    pub async fn refresh(&self) -> Result<(), EngineStopped> {
        self.request(|done| Command::Refresh { done }).await
    }

    /// Clear the session and enter `LoggedOut`.
    pub async fn logout(&self) -> Result<(), EngineStopped> {
        self.request(|done| Command::Logout { done }).await
    }

    /// Look for a session cookie after an interactive login.
    pub async fn check_login_status(&self) -> Result<LoginOutcome, EngineStopped> {
        self.request(|done| Command::CheckLoginStatus { done }).await
    }

    pub async fn reachability_changed(&self, status: PathStatus) -> Result<(), EngineStopped> {
        self.request(|done| Command::Reachability { status, done })
            .await
    }

    pub async fn poll_tick(&self) -> Result<(), EngineStopped> {
        self.request(|done| Command::PollTick { done }).await
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// A receiver that is notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// Wait until no fetch is in progress and return that snapshot.
    pub async fn settled(&self) -> Result<Snapshot, EngineStopped> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|s| s.state != State::Loading)
            .await
            .map_err(|_| EngineStopped)?;
        Ok(snapshot.clone())
    }
}
