//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the coding algorithm's input contract.
/// These are independent of parsing, configuration and output concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("resource exhausted: cannot allocate {requested} {what}")]
    ResourceExhausted { what: &'static str, requested: usize },
}

impl DomainError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
