//! # Query Spec Validation
//!
//! Turns raw JSON input into a `QuerySpec` that engines can trust. Engines
//! never validate shape themselves; everything here runs before execution.
//!
//! Checks:
//! - `pageSize` in `1..=100` (default 20)
//! - `pageIndex` a non-negative integer
//! - every filter and sort `field` non-empty
//! - every filter `op` one of the known operators
//! - every sort `direction` either `asc` or `desc`
//!
//! Field names are never checked against an entity's actual fields, and a
//! filter `value` is never checked against its operator.

use serde_json::Value;
use thiserror::Error;

use super::pagination::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use super::spec::QuerySpec;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a raw query spec is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input does not have the shape of a query spec
    #[error("Malformed query spec: {0}")]
    Malformed(String),

    /// Page size outside the accepted range
    #[error("pageSize {size} out of range ({min}..={max})")]
    PageSizeOutOfRange { size: usize, min: usize, max: usize },

    /// A filter or sort key names an empty field
    #[error("Empty field name at {0}")]
    EmptyField(String),

    /// A filter uses an operator outside the known set
    #[error("Unknown filter operator at {location}: {op}")]
    UnknownOperator { location: String, op: String },
}

/// Parse and validate a raw JSON query spec
pub fn parse_query_spec(raw: &Value) -> ValidationResult<QuerySpec> {
    let spec: QuerySpec = serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;

    validate_spec(&spec)?;

    Ok(spec)
}

/// Validate an already-built spec
pub fn validate_spec<F: AsRef<str>>(spec: &QuerySpec<F>) -> ValidationResult<()> {
    let size = spec.pagination.page_size;
    if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
        return Err(ValidationError::PageSizeOutOfRange {
            size,
            min: MIN_PAGE_SIZE,
            max: MAX_PAGE_SIZE,
        });
    }

    for (i, filter) in spec.filters.iter().enumerate() {
        if filter.field_name().is_empty() {
            return Err(ValidationError::EmptyField(format!("filters[{}]", i)));
        }
        if !filter.op.is_known() {
            return Err(ValidationError::UnknownOperator {
                location: format!("filters[{}]", i),
                op: filter.op.to_string(),
            });
        }
    }

    for (i, sort) in spec.sorting.iter().enumerate() {
        if sort.field_name().is_empty() {
            return Err(ValidationError::EmptyField(format!("sorting[{}]", i)));
        }
    }

    Ok(())
}
