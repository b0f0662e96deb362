use std::time::Instant;

use dom_port::{DocumentPort, NodeId, Notification};
use tabfill_core_types::PortError;
use tracing::{debug, instrument};

use crate::errors::TypeTextError;
use crate::keys::char_strokes;
use crate::model::TypeReport;
use crate::policy::TypePolicyView;

#[instrument(skip_all, fields(node = %node, chars = text.chars().count()))]
pub async fn execute(
    doc: &dyn DocumentPort,
    policy: &TypePolicyView,
    node: &NodeId,
    text: &str,
) -> Result<TypeReport, PortError> {
    if !policy.enabled {
        return Err(TypeTextError::Disabled.into());
    }
    let chars = text.chars().count();
    if let Some(max) = policy.max_text_len {
        if chars > max {
            return Err(TypeTextError::TextTooLong(max).into());
        }
    }

    let mut report = TypeReport::new(Instant::now());
    doc.set_value(node, "").await?;
    for ch in text.chars() {
        insert_char(doc, node, ch).await?;
        report.chars_typed += 1;
    }
    doc.notify(node, Notification::Change).await?;

    report.final_len = doc.value(node).await?.chars().count();
    debug!(final_len = report.final_len, "typed");
    Ok(report.finish(Instant::now()))
}

/// keydown, keypress, value + input, keyup.
async fn insert_char(doc: &dyn DocumentPort, node: &NodeId, ch: char) -> Result<(), PortError> {
    let [down, press, up] = char_strokes(ch);
    doc.dispatch_key(node, &down).await?;
    doc.dispatch_key(node, &press).await?;
    // Page key handlers may have touched the value, so append to what is there now.
    let mut value = doc.value(node).await?;
    value.push(ch);
    doc.set_value(node, &value).await?;
    doc.notify(node, Notification::Input).await?;
    doc.dispatch_key(node, &up).await?;
    Ok(())
}
