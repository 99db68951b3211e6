//! Reachability by periodic TCP connect.

use std::time::Duration;

use spotifriend_config::schema::ReachabilityConfig;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::PathStatus;

/// Probes `host:port` on an interval and reports status changes.
///
/// The first probe result is always reported.
#[derive(Debug, Clone)]
pub struct ProbeMonitor {
    host: String,
    port: u16,
    interval: Duration,
    timeout: Duration,
}

impl ProbeMonitor {
    pub fn new(host: impl Into<String>, port: u16, interval: Duration, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            interval,
            timeout,
        }
    }

    pub fn from_config(config: &ReachabilityConfig) -> Self {
        Self::new(
            config.probe_host.clone(),
            config.probe_port,
            Duration::from_secs(u64::from(config.interval_secs)),
            Duration::from_secs(u64::from(config.timeout_secs)),
        )
    }

    /// Start probing in the background. The task stops once the returned
    /// receiver is dropped.
    pub fn start(self) -> mpsc::Receiver<PathStatus> {
        let (status_tx, status_rx) = mpsc::channel(16);
        tokio::spawn(async move {
            info!(host = %self.host, port = self.port, "reachability monitor started");
            let mut last = None;
            loop {
                let status = self.probe().await;
                if last != Some(status) {
                    debug!(?status, "path status");
                    if status_tx.send(status).await.is_err() {
                        break;
                    }
                    last = Some(status);
                }
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = status_tx.closed() => break,
                }
            }
            debug!("reachability monitor stopped");
        });
        status_rx
    }

    async fn probe(&self) -> PathStatus {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => PathStatus::Satisfied,
            Ok(Err(e)) => {
                debug!(error = %e, "probe failed");
                PathStatus::Unsatisfied
            }
            Err(_) => {
                debug!("probe timed out");
                PathStatus::Unsatisfied
            }
        }
    }
}
