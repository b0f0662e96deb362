use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TypePolicyView {
    pub enabled: bool,
    /// Longest segment typed character by character; unbounded when unset.
    pub max_text_len: Option<usize>,
}

impl Default for TypePolicyView {
    fn default() -> Self {
        Self {
            enabled: true,
            max_text_len: None,
        }
    }
}
