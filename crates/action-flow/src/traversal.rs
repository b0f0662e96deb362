//! Focus traversal: current and next target, resolved from live focus

use dom_port::DocumentPort;
use tabfill_core_types::PortError;

use crate::discovery::{discover, FieldElement};

/// Focused eligible field, else the first eligible one
pub async fn resolve_current(doc: &dyn DocumentPort) -> Result<Option<FieldElement>, PortError> {
    let fields = discover(doc).await?;
    let active = doc.active_element().await?;
    let idx = active
        .and_then(|id| fields.iter().position(|field| field.id == id))
        .unwrap_or(0);
    Ok(fields.into_iter().nth(idx))
}

/// Field after the focused one; the first eligible one when focus is elsewhere
pub async fn resolve_next(doc: &dyn DocumentPort) -> Result<Option<FieldElement>, PortError> {
    let fields = discover(doc).await?;
    let active = doc.active_element().await?;
    let idx = match active.and_then(|id| fields.iter().position(|field| field.id == id)) {
        Some(pos) => pos + 1,
        None => 0,
    };
    Ok(fields.into_iter().nth(idx))
}
