//! Serializable result wrapper
//!
//! Shapes a service call for the wire: `{"ok":true,"value":...}` on success,
//! `{"ok":false,"error":{"kind":...,"message":...}}` on failure. An empty
//! page is a success.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::datasource::DataSourceError;
use crate::query::ValidationError;

/// Failure category reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// The spec was rejected before execution
    Validation,
    /// The backend does not implement the operation
    Unsupported,
    /// Unexpected fault during execution
    ExecutionFailed,
}

/// Failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&DataSourceError> for Failure {
    fn from(err: &DataSourceError) -> Self {
        let kind = match err {
            DataSourceError::Unsupported { .. } => FailureKind::Unsupported,
            DataSourceError::ExecutionFailed(_) => FailureKind::ExecutionFailed,
        };
        Failure::new(kind, err.to_string())
    }
}

impl From<&ValidationError> for Failure {
    fn from(err: &ValidationError) -> Self {
        Failure::new(FailureKind::Validation, err.to_string())
    }
}

/// Success value or typed failure
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    Ok(V),
    Err(Failure),
}

impl<V> Outcome<V> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(failure) => Some(failure),
        }
    }
}

impl<V> From<Result<V, DataSourceError>> for Outcome<V> {
    fn from(result: Result<V, DataSourceError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(err) => Outcome::Err(Failure::from(&err)),
        }
    }
}

impl<V> From<ValidationError> for Outcome<V> {
    fn from(err: ValidationError) -> Self {
        Outcome::Err(Failure::from(&err))
    }
}

impl<V: Serialize> Serialize for Outcome<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Ok(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            Outcome::Err(failure) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", failure)?;
            }
        }
        state.end()
    }
}
