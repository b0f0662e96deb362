use async_trait::async_trait;
use tabfill_core_types::{NodeId, PortError};

use crate::model::{ChoiceOption, ControlSnapshot, KeyStroke, Notification};
use crate::notice::UserNotice;

/// Live, externally-owned document.
#[async_trait]
pub trait DocumentPort: Send + Sync {
    /// Every form control in document order, eligible or not.
    async fn scan_controls(&self) -> Result<Vec<ControlSnapshot>, PortError>;
    async fn active_element(&self) -> Result<Option<NodeId>, PortError>;
    async fn focus(&self, node: &NodeId) -> Result<(), PortError>;
    async fn value(&self, node: &NodeId) -> Result<String, PortError>;
    /// Raw assignment. Emits nothing; callers pair it with [`DocumentPort::notify`].
    async fn set_value(&self, node: &NodeId, value: &str) -> Result<(), PortError>;
    async fn dispatch_key(&self, node: &NodeId, stroke: &KeyStroke) -> Result<(), PortError>;
    async fn notify(&self, node: &NodeId, notification: Notification) -> Result<(), PortError>;
    async fn options(&self, node: &NodeId) -> Result<Vec<ChoiceOption>, PortError>;
    /// Monotonic counter bumped on every structural change of the option list.
    async fn options_revision(&self, node: &NodeId) -> Result<u64, PortError>;
}

/// Resolves on the host's next paint opportunity.
#[async_trait]
pub trait FramePort: Send + Sync {
    async fn next_frame(&self);
}

#[async_trait]
pub trait ClipboardPort: Send + Sync {
    async fn read_text(&self) -> Result<String, PortError>;
}

#[async_trait]
pub trait NoticePort: Send + Sync {
    async fn alert(&self, notice: UserNotice);
}
