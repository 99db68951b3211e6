//! "Last active" labels for friend rows.

use serde::Serialize;

/// A compact relative time such as `now`, `12m`, `3hr` or `2d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeTime {
    pub display: String,
    /// `true` when the friend counts as listening right now.
    pub is_now: bool,
}

/// Describe how long ago `timestamp_ms` was, as seen from `now_ms`.
///
/// Both are Unix milliseconds; only whole seconds count.
pub fn format_timestamp(timestamp_ms: i64, now_ms: i64) -> RelativeTime {
    let minutes = (now_ms / 1000).abs_diff(timestamp_ms / 1000) / 60;

    if minutes > 24 * 60 {
        RelativeTime {
            display: format!("{}d", minutes / (24 * 60)),
            is_now: false,
        }
    } else if minutes > 60 {
        RelativeTime {
            display: format!("{}hr", minutes / 60),
            is_now: false,
        }
    } else if minutes > 5 {
        RelativeTime {
            display: format!("{minutes}m"),
            is_now: false,
        }
    } else {
        RelativeTime {
            display: "now".to_string(),
            is_now: true,
        }
    }
}

/// [`format_timestamp`] against the wall clock.
pub fn format_since_now(timestamp_ms: i64) -> RelativeTime {
    format_timestamp(timestamp_ms, chrono::Utc::now().timestamp_millis())
}
