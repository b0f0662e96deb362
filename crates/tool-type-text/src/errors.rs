use thiserror::Error;

use tabfill_core_types::PortError;

#[derive(Debug, Error)]
pub enum TypeTextError {
    #[error("tool disabled by policy")]
    Disabled,
    #[error("text exceeds max length ({0})")]
    TextTooLong(usize),
}

impl From<TypeTextError> for PortError {
    fn from(err: TypeTextError) -> Self {
        PortError::new(err.to_string())
    }
}
