//! Run lifecycle and reporting types

use chrono::{DateTime, Utc};
use dom_port::NodeId;
use serde::Serialize;
use tabfill_core_types::RunId;
use tool_select_option::SelectOutcome;

use crate::discovery::FieldKind;

/// Run lifecycle: idle → running → completed | aborted
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Aborted)
    }

    /// Preconditions abort from idle; only a started run can complete
    pub fn can_transition(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Idle, RunState::Running)
                | (RunState::Idle, RunState::Aborted)
                | (RunState::Running, RunState::Completed)
                | (RunState::Running, RunState::Aborted)
        )
    }
}

/// Why a completed run stopped
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every value was consumed
    ValuesExhausted,
    /// No eligible field was left to fill
    NoCurrentTarget,
    /// The last reachable field was filled; remaining values stay unfilled
    NoNextTarget,
}

/// Result of applying one value to one field
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillOutcome {
    Typed { chars: usize },
    Selected { outcome: SelectOutcome },
    /// Contained per-field fault; the run continued
    Failed { reason: String },
}

/// One visited field
#[derive(Clone, Debug, Serialize)]
pub struct FieldFill {
    pub index: usize,
    pub node: NodeId,
    pub kind: FieldKind,
    pub outcome: FillOutcome,
}

/// Completed run summary
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub state: RunState,
    pub stop: StopReason,
    pub values_total: usize,
    pub fills: Vec<FieldFill>,
    pub started_at: DateTime<Utc>,
    pub latency_ms: u64,
}

impl RunReport {
    /// Values that were never placed in a field
    pub fn unfilled(&self) -> usize {
        self.values_total.saturating_sub(self.fills.len())
    }
}
