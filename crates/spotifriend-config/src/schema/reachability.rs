//! Network reachability probe configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachabilityConfig {
    pub enabled: bool,
    pub probe_host: String,
    pub probe_port: u16,
    /// Seconds between probes (valid range: 1-300).
    pub interval_secs: u32,
    /// Connect timeout per probe in seconds (valid range: 1-60).
    pub timeout_secs: u32,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probe_host: "open.spotify.com".into(),
            probe_port: 443,
            interval_secs: 10,
            timeout_secs: 5,
        }
    }
}
