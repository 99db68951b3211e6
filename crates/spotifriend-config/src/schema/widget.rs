//! Home-screen widget configuration.

use serde::{Deserialize, Serialize};

/// Widget size, which decides how many friends are shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum WidgetFamily {
    #[default]
    Medium,
    Large,
}

impl WidgetFamily {
    pub fn capacity(self) -> usize {
        match self {
            WidgetFamily::Medium => 2,
            WidgetFamily::Large => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Minutes until the next timeline entry after a successful fetch.
    pub refresh_minutes: u32,
    /// Minutes until the retry after a failed fetch.
    pub retry_minutes: u32,
    pub family: WidgetFamily,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: 15,
            retry_minutes: 5,
            family: WidgetFamily::Medium,
        }
    }
}
