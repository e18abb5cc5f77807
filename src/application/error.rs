//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add input/config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("malformed token {position} ({token:?}): {reason}")]
    Parse {
        /// 1-based position among the non-empty tokens
        position: usize,
        token: String,
        reason: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True for errors caused by the symbol/frequency input itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Parse { .. } | ApplicationError::Domain(DomainError::InvalidInput { .. })
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
