use std::sync::Arc;

use async_trait::async_trait;
use dom_port::{DocumentPort, NodeId};
use tabfill_core_types::PortError;

use crate::model::TypeReport;
use crate::policy::TypePolicyView;
use crate::runner::execute;

/// Clears a text-like field and re-enters `text` one synthesized keystroke at a time.
#[async_trait]
pub trait TypeTextTool: Send + Sync {
    async fn type_into(&self, node: &NodeId, text: &str) -> Result<TypeReport, PortError>;
}

pub struct TypeTextToolBuilder {
    policy: TypePolicyView,
    document: Option<Arc<dyn DocumentPort>>,
}

impl TypeTextToolBuilder {
    pub fn new(policy: TypePolicyView) -> Self {
        Self {
            policy,
            document: None,
        }
    }

    pub fn with_document(mut self, port: Arc<dyn DocumentPort>) -> Self {
        self.document = Some(port);
        self
    }

    pub fn build(self) -> Result<Arc<dyn TypeTextTool>, PortError> {
        let document = self
            .document
            .ok_or_else(|| PortError::new("document port is required"))?;
        Ok(Arc::new(TypeTextToolImpl {
            policy: self.policy,
            document,
        }))
    }
}

struct TypeTextToolImpl {
    policy: TypePolicyView,
    document: Arc<dyn DocumentPort>,
}

#[async_trait]
impl TypeTextTool for TypeTextToolImpl {
    async fn type_into(&self, node: &NodeId, text: &str) -> Result<TypeReport, PortError> {
        execute(self.document.as_ref(), &self.policy, node, text).await
    }
}
