use serde::{Deserialize, Serialize};
use std::time::Duration;

use render_sync::StabilityWindow;

use crate::model::MatchKey;

/// Per-selection options.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Compare option values before display texts.
    pub value_first: bool,
    pub allow_contains_fallback: bool,
    /// Re-read after one scheduler turn and re-apply once if page code overwrote it.
    pub verify_and_retry: bool,
    /// Wait for the option list to stop changing before matching.
    pub wait_options: bool,
    /// Settling delay around the assignment; `None` inherits the run delay.
    pub delay_ms: Option<u64>,
    pub stability: StabilityWindow,
}

impl SelectConfig {
    /// Prefix-only matching with no retry and no stability wait.
    pub fn legacy() -> Self {
        Self {
            value_first: true,
            allow_contains_fallback: false,
            verify_and_retry: false,
            wait_options: false,
            delay_ms: None,
            stability: StabilityWindow::default(),
        }
    }

    pub fn key_order(&self) -> [MatchKey; 2] {
        if self.value_first {
            [MatchKey::Value, MatchKey::Text]
        } else {
            [MatchKey::Text, MatchKey::Value]
        }
    }

    pub fn delay_or(&self, fallback: Duration) -> Duration {
        self.delay_ms.map(Duration::from_millis).unwrap_or(fallback)
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            value_first: true,
            allow_contains_fallback: true,
            verify_and_retry: true,
            wait_options: false,
            delay_ms: None,
            stability: StabilityWindow::default(),
        }
    }
}
