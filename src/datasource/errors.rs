//! # DataSource Errors
//!
//! The failure contract every backend shares. Looking up a missing id is not
//! an error; it is `Ok(None)`.

use thiserror::Error;

use crate::engine::{ExecutorError, ExecutorErrorCode};

/// Result type for data source operations
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Data source errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSourceError {
    /// The backend does not implement the requested operation. Recoverable:
    /// callers can fall back to `query` with an `eq` filter.
    #[error("operation not supported: {operation}")]
    Unsupported { operation: String },

    /// Unexpected fault during execution, including remote backend failures
    #[error("query execution failed: {0}")]
    ExecutionFailed(String),
}

impl DataSourceError {
    pub fn unsupported(operation: impl Into<String>) -> Self {
        DataSourceError::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn execution_failed(reason: impl Into<String>) -> Self {
        DataSourceError::ExecutionFailed(reason.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, DataSourceError::Unsupported { .. })
    }
}

impl From<ExecutorError> for DataSourceError {
    fn from(err: ExecutorError) -> Self {
        match err.code() {
            ExecutorErrorCode::QueryUnsupportedOperator => {
                DataSourceError::unsupported(err.message())
            }
        }
    }
}
