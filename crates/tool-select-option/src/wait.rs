use dom_port::{DocumentPort, NodeId};
use render_sync::{OptionsSettle, RenderSync};
use tracing::{debug, warn};

use crate::policy::SelectConfig;

/// Best-effort: a failed or timed-out wait still lets matching proceed.
pub async fn await_options(
    doc: &dyn DocumentPort,
    sync: &RenderSync,
    node: &NodeId,
    config: &SelectConfig,
) {
    if !config.wait_options {
        return;
    }
    match sync.wait_options_stable(doc, node, &config.stability).await {
        Ok(OptionsSettle::TimedOut) => {
            warn!(node = %node, timeout_ms = config.stability.timeout_ms, "options still changing; matching anyway")
        }
        Ok(settle) => debug!(node = %node, ?settle, "options settled"),
        Err(err) => warn!(node = %node, error = %err, "options wait failed"),
    }
}
