use std::sync::Arc;

use async_trait::async_trait;
use dom_port::{DocumentPort, NodeId};
use render_sync::RenderSync;
use tabfill_core_types::PortError;

use crate::model::SelectReport;
use crate::policy::SelectConfig;
use crate::runner::execute;

/// Resolves raw text to the best-matching option of a single-choice field and applies it.
#[async_trait]
pub trait SelectTool: Send + Sync {
    async fn select_best_match(
        &self,
        node: &NodeId,
        raw: &str,
        config: &SelectConfig,
    ) -> Result<SelectReport, PortError>;
}

pub struct SelectToolBuilder {
    document: Option<Arc<dyn DocumentPort>>,
    sync: Option<RenderSync>,
}

impl SelectToolBuilder {
    pub fn new() -> Self {
        Self {
            document: None,
            sync: None,
        }
    }

    pub fn with_document(mut self, port: Arc<dyn DocumentPort>) -> Self {
        self.document = Some(port);
        self
    }

    pub fn with_render_sync(mut self, sync: RenderSync) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn build(self) -> Result<Arc<dyn SelectTool>, PortError> {
        let document = self
            .document
            .ok_or_else(|| PortError::new("document port is required"))?;
        let sync = self
            .sync
            .ok_or_else(|| PortError::new("render sync is required"))?;
        Ok(Arc::new(SelectToolImpl { document, sync }))
    }
}

impl Default for SelectToolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct SelectToolImpl {
    document: Arc<dyn DocumentPort>,
    sync: RenderSync,
}

#[async_trait]
impl SelectTool for SelectToolImpl {
    async fn select_best_match(
        &self,
        node: &NodeId,
        raw: &str,
        config: &SelectConfig,
    ) -> Result<SelectReport, PortError> {
        execute(self.document.as_ref(), &self.sync, node, raw, config).await
    }
}
