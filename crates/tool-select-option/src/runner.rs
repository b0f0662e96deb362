use std::time::Instant;

use dom_port::{DocumentPort, NodeId, Notification};
use render_sync::RenderSync;
use tabfill_core_types::PortError;
use tracing::{debug, instrument, warn};

use crate::errors::SelectError;
use crate::matcher::best_match;
use crate::model::{SelectOutcome, SelectReport};
use crate::policy::SelectConfig;
use crate::wait;

#[instrument(skip_all, fields(node = %node))]
pub async fn execute(
    doc: &dyn DocumentPort,
    sync: &RenderSync,
    node: &NodeId,
    raw: &str,
    config: &SelectConfig,
) -> Result<SelectReport, PortError> {
    let started_at = Instant::now();
    if raw.is_empty() {
        return Ok(SelectReport::new(SelectOutcome::Skipped, started_at));
    }

    wait::await_options(doc, sync, node, config).await;
    let delay = config.delay_or(sync.delay());
    sync.settle(delay).await;

    let options = doc.options(node).await?;
    let Some(hit) = best_match(
        &options,
        raw,
        config.key_order(),
        config.allow_contains_fallback,
    ) else {
        warn!(options = options.len(), "{}", SelectError::OptionMissing(raw.to_string()));
        return Ok(SelectReport::new(SelectOutcome::NoMatch, started_at));
    };
    let value = options[hit.index].value.clone();
    debug!(index = hit.index, tier = ?hit.tier, key = ?hit.key, "option matched");

    apply(doc, node, &value).await?;
    sync.settle(delay).await;

    let mut retried = false;
    if config.verify_and_retry {
        sync.next_tick().await;
        let current = doc.value(node).await?;
        if current != value {
            warn!(expected = %value, found = %current, "selection overwritten by page; re-applying");
            apply(doc, node, &value).await?;
            retried = true;
            sync.next_tick().await;
            sync.settle(delay).await;
        }
    }

    Ok(SelectReport::new(
        SelectOutcome::Applied {
            value,
            tier: hit.tier,
            key: hit.key,
            retried,
        },
        started_at,
    ))
}

async fn apply(doc: &dyn DocumentPort, node: &NodeId, value: &str) -> Result<(), PortError> {
    doc.set_value(node, value).await?;
    doc.notify(node, Notification::Change).await
}
