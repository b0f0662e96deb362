use dom_port::{KeyStroke, NodeId, Notification};

/// Observable side effect recorded by [`crate::SimPage`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JournalEntry {
    Focus(NodeId),
    Key { node: NodeId, stroke: KeyStroke },
    SetValue { node: NodeId, value: String },
    Notify { node: NodeId, notification: Notification },
}

impl JournalEntry {
    pub fn node(&self) -> &NodeId {
        match self {
            JournalEntry::Focus(node) => node,
            JournalEntry::Key { node, .. }
            | JournalEntry::SetValue { node, .. }
            | JournalEntry::Notify { node, .. } => node,
        }
    }
}
