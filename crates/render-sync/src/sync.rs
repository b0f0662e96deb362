use std::sync::Arc;
use std::time::Duration;

use dom_port::{DocumentPort, FramePort, NodeId, PortError};
use tokio::task::yield_now;
use tokio::time::{sleep, sleep_until, timeout_at, Instant};
use tracing::debug;

use crate::policy::StabilityWindow;

/// How an option-list wait ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionsSettle {
    /// Nothing changed during the grace window.
    Unchanged,
    /// Changes were observed, then a full frame passed without any.
    Stable,
    /// The list was still changing when the bound elapsed.
    TimedOut,
}

#[derive(Clone)]
pub struct RenderSync {
    frames: Arc<dyn FramePort>,
    delay: Duration,
}

impl RenderSync {
    pub fn new(frames: Arc<dyn FramePort>, delay: Duration) -> Self {
        Self { frames, delay }
    }

    /// Run-wide settling delay appended to every render wait.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pending tasks, then the next frame, then one more scheduler turn,
    /// then the configured settling delay.
    pub async fn wait_for_render(&self) {
        yield_now().await;
        self.frames.next_frame().await;
        yield_now().await;
        settle(self.delay).await;
    }

    /// Single scheduler turn so page reactions queued by the last write can run.
    pub async fn next_tick(&self) {
        yield_now().await;
    }

    pub async fn settle(&self, delay: Duration) {
        settle(delay).await;
    }

    /// Wait until `node`'s option list stops changing or `window` elapses.
    pub async fn wait_options_stable(
        &self,
        doc: &dyn DocumentPort,
        node: &NodeId,
        window: &StabilityWindow,
    ) -> Result<OptionsSettle, PortError> {
        let deadline = Instant::now() + window.timeout();
        let initial_len = doc.options(node).await?.len();
        let initial_rev = doc.options_revision(node).await?;

        yield_now().await;
        if !self.frame_before(deadline).await {
            return Ok(OptionsSettle::TimedOut);
        }

        if doc.options(node).await?.len() == initial_len {
            let grace_end = deadline.min(Instant::now() + window.grace());
            sleep_until(grace_end).await;
            if doc.options_revision(node).await? == initial_rev {
                debug!(node = %node, options = initial_len, "option list unchanged");
                return Ok(OptionsSettle::Unchanged);
            }
        }

        let mut last = doc.options_revision(node).await?;
        loop {
            if !self.frame_before(deadline).await {
                debug!(node = %node, "option list still changing at timeout");
                return Ok(OptionsSettle::TimedOut);
            }
            let revision = doc.options_revision(node).await?;
            if revision == last {
                debug!(node = %node, revision, "option list stable");
                return Ok(OptionsSettle::Stable);
            }
            last = revision;
        }
    }

    async fn frame_before(&self, deadline: Instant) -> bool {
        timeout_at(deadline, self.frames.next_frame()).await.is_ok()
    }
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}
