//! State machine configuration.

use serde::{Deserialize, Serialize};

/// Which revision of the state machine to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum StateModel {
    /// Seven states. Starts in `Initial` on first launch and ignores
    /// reachability until the user acts.
    #[default]
    FirstLaunchAware,
    /// Six states. Always starts in `Idle`; reachability is never gated.
    Collapsed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct EngineConfig {
    pub state_model: StateModel,
}
