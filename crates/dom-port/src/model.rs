use serde::{Deserialize, Serialize};
use tabfill_core_types::NodeId;

/// Element role as reported by the host document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Text,
    Password,
    #[serde(alias = "text-area")]
    Textarea,
    Select,
    Checkbox,
    Radio,
    Button,
    Other,
}

/// Point-in-time view of one form control, in document order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlSnapshot {
    pub id: NodeId,
    pub kind: ControlKind,
    /// Has a rendered box (the DOM `offsetParent` test).
    pub rendered: bool,
    pub disabled: bool,
    pub readonly: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    Press,
    Up,
}

impl KeyPhase {
    pub fn event_type(self) -> &'static str {
        match self {
            KeyPhase::Down => "keydown",
            KeyPhase::Press => "keypress",
            KeyPhase::Up => "keyup",
        }
    }
}

/// Synthesized keyboard event payload.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyStroke {
    pub phase: KeyPhase,
    pub key: String,
    pub code: String,
    pub key_code: u32,
    pub which: u32,
}

/// Value notifications observed by page listeners.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    /// Fired after every incremental edit.
    Input,
    /// Fired once the value is committed.
    Change,
}

impl Notification {
    pub fn event_type(self) -> &'static str {
        match self {
            Notification::Input => "input",
            Notification::Change => "change",
        }
    }
}

/// One entry of a single-choice list: what the user sees and what gets submitted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}
