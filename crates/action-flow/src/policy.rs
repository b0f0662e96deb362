//! Run configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tool_select_option::SelectConfig;
use tool_type_text::TypePolicyView;

/// Autofill run policy
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillPolicyView {
    /// Settling delay appended to every render wait, in milliseconds
    pub delay_ms: u64,

    /// Frame period used when the host supplies no paint signal
    pub frame_ms: u64,

    /// Options for single-choice fields
    pub select: SelectConfig,

    /// Options for text-like fields
    pub typing: TypePolicyView,
}

impl AutofillPolicyView {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AutofillPolicyView {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            frame_ms: 16,
            select: SelectConfig {
                wait_options: true,
                ..SelectConfig::default()
            },
            typing: TypePolicyView::default(),
        }
    }
}
