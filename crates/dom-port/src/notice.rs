use serde::{Deserialize, Serialize};

/// Setup faults surfaced to the user through a blocking notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UserNotice {
    ClipboardUnreadable,
    ClipboardEmpty,
    NoInputFields,
    FocusInputField,
}

impl UserNotice {
    /// Stable lookup key for localized message catalogs.
    pub fn message_key(self) -> &'static str {
        match self {
            UserNotice::ClipboardUnreadable => "clipboardReadFailed",
            UserNotice::ClipboardEmpty => "clipboardNoText",
            UserNotice::NoInputFields => "noInputFields",
            UserNotice::FocusInputField => "focusInputField",
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            UserNotice::ClipboardUnreadable => "Could not read text from the clipboard.",
            UserNotice::ClipboardEmpty => "The clipboard does not contain any text.",
            UserNotice::NoInputFields => "No input fields were found on this page.",
            UserNotice::FocusInputField => "Focus the input field to start from, then try again.",
        }
    }
}
