use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Which side of an option is compared against the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKey {
    Value,
    Text,
}

/// Matching tiers, strongest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Prefix,
    Contains,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Empty input; the field was not touched.
    Skipped,
    /// No option matched under any tier; the existing selection was kept.
    NoMatch,
    Applied {
        value: String,
        tier: MatchTier,
        key: MatchKey,
        /// Page code overwrote the first assignment and it was applied again.
        retried: bool,
    },
}

#[derive(Clone, Debug)]
pub struct SelectReport {
    pub outcome: SelectOutcome,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
}

impl SelectReport {
    pub fn new(outcome: SelectOutcome, started_at: Instant) -> Self {
        let finished_at = Instant::now();
        Self {
            outcome,
            started_at,
            finished_at,
            latency_ms: finished_at
                .saturating_duration_since(started_at)
                .as_millis(),
        }
    }
}
