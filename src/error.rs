//! Error types for the deskboard core.

use thiserror::Error;

/// Errors that can occur in deskboard domain operations.
///
/// The calendar expansion and countdown computations are total over
/// well-formed input and never return these; errors come from validation
/// of stored rows and from typed access to opaque widget payloads.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for deskboard operations.
pub type BoardResult<T> = Result<T, BoardError>;

pub(crate) fn non_empty(value: &str, field_name: &str) -> BoardResult<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!(
            "{field_name} must not be empty"
        )));
    }
    Ok(())
}
