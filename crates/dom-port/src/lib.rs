//! Ports through which the autofill engine reaches externally-owned state.
//!
//! The document behind [`DocumentPort`] is mutable by page code at every
//! suspension point. Callers must re-query after each `.await` instead of
//! holding on to snapshots, option lists or focus answers.

pub mod model;
pub mod notice;
pub mod ports;

pub use model::{ChoiceOption, ControlKind, ControlSnapshot, KeyPhase, KeyStroke, Notification};
pub use notice::UserNotice;
pub use ports::{ClipboardPort, DocumentPort, FramePort, NoticePort};
pub use tabfill_core_types::{NodeId, PortError};
