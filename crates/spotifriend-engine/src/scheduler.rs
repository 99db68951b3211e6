//! Periodic refresh.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::engine::EngineHandle;

/// Send a poll tick to the engine every `period`, starting one period from
/// now. Ticks that would overlap a slow engine are delayed, not bunched.
pub fn spawn_poll_scheduler(engine: EngineHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if engine.poll_tick().await.is_err() {
                debug!("engine gone, poll scheduler exiting");
                break;
            }
        }
    })
}
