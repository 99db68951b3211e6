//! Network reachability.
//!
//! A monitor produces [`PathStatus`] changes on a channel;
//! [`forward_reachability`] feeds them into the engine.

mod probe;

pub use probe::ProbeMonitor;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::EngineHandle;

/// Whether the network path is currently usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Satisfied,
    Unsatisfied,
}

/// Deliver every status from `status_rx` to the engine until either side
/// goes away.
pub fn forward_reachability(
    mut status_rx: mpsc::Receiver<PathStatus>,
    engine: EngineHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(status) = status_rx.recv().await {
            debug!(?status, "reachability changed");
            if engine.reachability_changed(status).await.is_err() {
                break;
            }
        }
    })
}
