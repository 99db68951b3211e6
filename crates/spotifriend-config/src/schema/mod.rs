//! Configuration schema types for Spotifriend.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the mobile app.

mod api;
mod engine;
mod polling;
mod reachability;
mod store;
mod system;
mod widget;

pub use api::*;
pub use engine::*;
pub use polling::*;
pub use reachability::*;
pub use store::*;
pub use system::*;
pub use widget::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Spotifriend.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct SpotifriendConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub notifications: NotificationsConfig,
    pub reachability: ReachabilityConfig,
    pub engine: EngineConfig,
    pub store: StoreConfig,
    pub widget: WidgetConfig,
    pub logging: LoggingConfig,
}
