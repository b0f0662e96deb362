//! Sequential autofill orchestration
//!
//! Splits clipboard text into values and walks the form the way a person
//! pasting one value and pressing Tab would: resolve the focused field,
//! apply the value, resolve the next field, move focus, repeat. Every
//! decision re-reads the live document because filling one field can add,
//! hide or disable others.

pub mod discovery;
pub mod errors;
pub mod executor;
pub mod policy;
pub mod traversal;
pub mod types;
pub mod values;

pub use discovery::{discover, FieldElement, FieldKind};
pub use errors::AutofillError;
pub use executor::{
    AutofillOrchestrator, AutofillOrchestratorBuilder, DefaultAutofillOrchestrator, LogNotice,
};
pub use policy::AutofillPolicyView;
pub use traversal::{resolve_current, resolve_next};
pub use types::{FieldFill, FillOutcome, RunReport, RunState, StopReason};
pub use values::{ValueSequence, VALUE_DELIMITER};
