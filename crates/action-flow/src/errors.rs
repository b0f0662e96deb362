//! Autofill run error types

use dom_port::UserNotice;
use tabfill_core_types::PortError;
use thiserror::Error;

/// Errors that end a run
#[derive(Debug, Error)]
pub enum AutofillError {
    /// Clipboard could not be read (permission denied, unsupported host)
    #[error("Clipboard unreadable: {0}")]
    ClipboardUnreadable(String),

    /// Clipboard was readable but held no text
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// No eligible field exists in the document
    #[error("No eligible input fields found")]
    NoFields,

    /// Focus is not on an eligible field
    #[error("Focused element is not an eligible input field")]
    NoFocus,

    /// Orchestrator was built without a required port
    #[error("Missing port: {0}")]
    MissingPort(&'static str),

    /// Document query failed before any field was touched
    #[error("Document error: {0}")]
    Document(#[from] PortError),

    /// Document query failed mid-run; fields already written keep their values
    #[error("Run interrupted after {filled} field(s): {source}")]
    Interrupted { filled: usize, source: PortError },
}

impl AutofillError {
    /// User-facing notification for setup faults, if any
    pub fn notice(&self) -> Option<UserNotice> {
        match self {
            AutofillError::ClipboardUnreadable(_) => Some(UserNotice::ClipboardUnreadable),
            AutofillError::ClipboardEmpty => Some(UserNotice::ClipboardEmpty),
            AutofillError::NoFields => Some(UserNotice::NoInputFields),
            AutofillError::NoFocus => Some(UserNotice::FocusInputField),
            _ => None,
        }
    }

    /// Setup faults abort before any mutation
    pub fn is_setup_fault(&self) -> bool {
        self.notice().is_some()
    }
}
