use std::path::Path;

use dom_port::{ChoiceOption, ControlKind, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read page fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML page fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON page fixture: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture references unknown field '{0}'")]
    UnknownField(String),
    #[error("duplicate field id '{0}'")]
    DuplicateField(String),
}

/// Serialized page description.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub fields: Vec<FieldFixture>,
    /// Field focused when the page is loaded.
    pub focus: Option<NodeId>,
    /// Move focus on a synthesized Tab keydown, as some script-driven forms do.
    pub tab_moves_focus: bool,
    pub rules: Vec<ChangeRule>,
}

impl PageFixture {
    pub fn from_yaml_str(raw: &str) -> Result<Self, SimError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads `.json` files as JSON and anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            _ => Self::from_yaml_str(&raw),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SimError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(&field.id) {
                return Err(SimError::DuplicateField(field.id.0.clone()));
            }
        }
        let known = |id: &NodeId| seen.contains(id);
        if let Some(focus) = &self.focus {
            if !known(focus) {
                return Err(SimError::UnknownField(focus.0.clone()));
            }
        }
        for rule in &self.rules {
            if !known(&rule.source) {
                return Err(SimError::UnknownField(rule.source.0.clone()));
            }
            if let Some(target) = rule.effect.target() {
                if !known(target) {
                    return Err(SimError::UnknownField(target.0.clone()));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldFixture {
    pub id: NodeId,
    pub kind: ControlKind,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
}

impl FieldFixture {
    pub fn new(id: impl Into<NodeId>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            kind,
            value: None,
            hidden: false,
            disabled: false,
            readonly: false,
            options: Vec::new(),
        }
    }

    pub fn text(id: &str) -> Self {
        Self::new(id, ControlKind::Text)
    }

    pub fn select(id: &str, options: Vec<ChoiceOption>) -> Self {
        let mut field = Self::new(id, ControlKind::Select);
        field.options = options;
        field
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Page reaction to a change notification on `source`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangeRule {
    pub source: NodeId,
    pub effect: Effect,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Effect {
    Reveal { target: NodeId },
    Hide { target: NodeId },
    Disable { target: NodeId },
    /// Page code detaches `target` from the document.
    Remove { target: NodeId },
    /// Page code rewrites the source's value, `times` times at most.
    Overwrite {
        value: String,
        #[serde(default = "one")]
        times: u32,
    },
}

impl Effect {
    pub fn target(&self) -> Option<&NodeId> {
        match self {
            Effect::Reveal { target }
            | Effect::Hide { target }
            | Effect::Disable { target }
            | Effect::Remove { target } => Some(target),
            Effect::Overwrite { .. } => None,
        }
    }
}

fn one() -> u32 {
    1
}
