//! Friend-activity sync engine.
//!
//! The [`Engine`] owns the connection state, the last good friend list and
//! the live notification. Everything else talks to it through a cloneable
//! [`EngineHandle`]: the UI, the poll scheduler and the reachability
//! monitor all funnel into the same command queue, so state changes are
//! applied one at a time.

pub mod classifier;
pub mod deeplink;
pub mod engine;
pub mod guard;
pub mod pipeline;
pub mod reachability;
pub mod scheduler;
pub mod state;
pub mod widget;

pub use classifier::{classify, Classification};
pub use deeplink::{handle_play_link, parse_play_link, play_link, DeepLinkError, Opened};
pub use engine::{Engine, EngineDeps, EngineHandle, EngineOptions, EngineStopped, LoginOutcome};
pub use guard::{FlightGuard, SingleFlight};
pub use pipeline::fetch_friend_list;
pub use reachability::{forward_reachability, PathStatus, ProbeMonitor};
pub use scheduler::spawn_poll_scheduler;
pub use state::{Snapshot, State};
pub use widget::{Timeline, TimelineProvider, WidgetEntry, WidgetRow, EMPTY_MESSAGE};
