use tabfill_core_types::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no option matched input {0:?}")]
    OptionMissing(String),
}

impl From<SelectError> for PortError {
    fn from(err: SelectError) -> Self {
        PortError::new(err.to_string())
    }
}
