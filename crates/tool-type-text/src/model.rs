use std::time::Instant;

#[derive(Clone, Debug)]
pub struct TypeReport {
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
    pub chars_typed: usize,
    /// Value read back after the change notification.
    pub final_len: usize,
}

impl TypeReport {
    pub fn new(started_at: Instant) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            latency_ms: 0,
            chars_typed: 0,
            final_len: 0,
        }
    }

    pub fn finish(mut self, finished_at: Instant) -> Self {
        self.finished_at = finished_at;
        self.latency_ms = finished_at
            .saturating_duration_since(self.started_at)
            .as_millis();
        self
    }
}
