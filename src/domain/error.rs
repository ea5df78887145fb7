//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rejected container mutations.
///
/// Empty containers, out-of-range indices and non-printable glyphs are not
/// errors; those have defined fallbacks on the operations themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for list and tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
