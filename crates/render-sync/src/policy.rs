use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for [`crate::RenderSync::wait_options_stable`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityWindow {
    pub timeout_ms: u64,
    /// How long an unchanged option count is watched before giving up early.
    pub grace_ms: u64,
}

impl StabilityWindow {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

impl Default for StabilityWindow {
    fn default() -> Self {
        Self {
            timeout_ms: 500,
            grace_ms: 30,
        }
    }
}
