use std::time::Duration;

use async_trait::async_trait;
use dom_port::FramePort;
use tokio::time::sleep;

pub const DEFAULT_FRAME_MS: u64 = 16;

/// Frame source for hosts without a compositor: a fixed-period tick.
#[derive(Clone, Debug)]
pub struct IntervalFrames {
    period: Duration,
}

impl IntervalFrames {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for IntervalFrames {
    fn default() -> Self {
        Self::from_millis(DEFAULT_FRAME_MS)
    }
}

#[async_trait]
impl FramePort for IntervalFrames {
    async fn next_frame(&self) {
        sleep(self.period).await;
    }
}
