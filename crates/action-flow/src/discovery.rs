//! Element discovery: eligible fields in document order

use dom_port::{ControlKind, ControlSnapshot, DocumentPort, NodeId};
use serde::{Deserialize, Serialize};
use tabfill_core_types::PortError;

/// Field kinds the engine fills
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    TextInput,
    PasswordInput,
    TextArea,
    SingleChoice,
}

impl FieldKind {
    pub fn from_control(kind: ControlKind) -> Option<Self> {
        match kind {
            ControlKind::Text => Some(FieldKind::TextInput),
            ControlKind::Password => Some(FieldKind::PasswordInput),
            ControlKind::Textarea => Some(FieldKind::TextArea),
            ControlKind::Select => Some(FieldKind::SingleChoice),
            _ => None,
        }
    }

    /// Filled by keystroke simulation rather than option selection
    pub fn is_text_like(self) -> bool {
        !matches!(self, FieldKind::SingleChoice)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::TextInput => "text",
            FieldKind::PasswordInput => "password",
            FieldKind::TextArea => "textarea",
            FieldKind::SingleChoice => "select",
        }
    }
}

/// Handle to one eligible field, valid until the next suspension point
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldElement {
    pub id: NodeId,
    pub kind: FieldKind,
}

/// Visible, enabled, and (for text-like kinds) writable
fn eligible(control: &ControlSnapshot) -> Option<FieldElement> {
    let kind = FieldKind::from_control(control.kind)?;
    if !control.rendered || control.disabled {
        return None;
    }
    if kind.is_text_like() && control.readonly {
        return None;
    }
    Some(FieldElement {
        id: control.id.clone(),
        kind,
    })
}

/// Scan the document fresh; never cached across calls
pub async fn discover(doc: &dyn DocumentPort) -> Result<Vec<FieldElement>, PortError> {
    Ok(doc.scan_controls().await?.iter().filter_map(eligible).collect())
}
