//! # Filter Conditions
//!
//! Field/operator/value triples combined with AND logic by every engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter operators
///
/// The named variants are a stability contract: operators may be added but
/// never removed, since engines key their push-down split off this list.
/// Names this build does not recognize deserialize into [`FilterOperator::Other`]
/// so they reach the engine instead of failing at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    /// Strict equality
    Eq,
    /// Strict inequality
    Neq,
    /// Case-insensitive substring
    Contains,
    /// Case-insensitive prefix
    StartsWith,
    /// Case-insensitive suffix
    EndsWith,
    /// Greater than
    Gt,
    /// Less than
    Lt,
    /// Greater than or equal
    Gte,
    /// Less than or equal
    Lte,
    /// Membership in an array value
    In,
    /// Operator unknown to this build
    Other(String),
}

impl FilterOperator {
    /// Every operator this build knows how to evaluate.
    pub const KNOWN: [FilterOperator; 10] = [
        FilterOperator::Eq,
        FilterOperator::Neq,
        FilterOperator::Contains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::Gte,
        FilterOperator::Lte,
        FilterOperator::In,
    ];

    /// Resolve an operator from its wire name
    pub fn from_name(name: &str) -> Self {
        match name {
            "eq" => FilterOperator::Eq,
            "neq" => FilterOperator::Neq,
            "contains" => FilterOperator::Contains,
            "startsWith" => FilterOperator::StartsWith,
            "endsWith" => FilterOperator::EndsWith,
            "gt" => FilterOperator::Gt,
            "lt" => FilterOperator::Lt,
            "gte" => FilterOperator::Gte,
            "lte" => FilterOperator::Lte,
            "in" => FilterOperator::In,
            other => FilterOperator::Other(other.to_string()),
        }
    }

    /// Get the operator wire name
    pub fn as_str(&self) -> &str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lte => "lte",
            FilterOperator::In => "in",
            FilterOperator::Other(name) => name,
        }
    }

    /// Returns true unless this is an [`FilterOperator::Other`]
    pub fn is_known(&self) -> bool {
        !matches!(self, FilterOperator::Other(_))
    }
}

impl From<String> for FilterOperator {
    fn from(name: String) -> Self {
        match FilterOperator::from_name(&name) {
            FilterOperator::Other(_) => FilterOperator::Other(name),
            known => known,
        }
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        match op {
            FilterOperator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter condition
///
/// `F` restricts field names at compile time only; at runtime a field is just
/// its string form and is never checked against the entity's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition<F = String> {
    /// Field to filter on
    pub field: F,

    /// Comparison operator
    pub op: FilterOperator,

    /// Value to compare against; its type is not checked against `op`
    pub value: Value,
}

impl<F> FilterCondition<F> {
    /// Create a new filter condition
    pub fn new(field: impl Into<F>, op: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Create an inequality filter
    pub fn neq(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Neq, value)
    }

    /// Create a case-insensitive substring filter
    pub fn contains(field: impl Into<F>, needle: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, Value::String(needle.into()))
    }

    /// Create a case-insensitive prefix filter
    pub fn starts_with(field: impl Into<F>, prefix: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::StartsWith, Value::String(prefix.into()))
    }

    /// Create a case-insensitive suffix filter
    pub fn ends_with(field: impl Into<F>, suffix: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::EndsWith, Value::String(suffix.into()))
    }

    /// Create a greater than filter
    pub fn gt(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Gt, value)
    }

    /// Create a less than filter
    pub fn lt(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Lt, value)
    }

    /// Create a greater than or equal filter
    pub fn gte(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }

    /// Create a less than or equal filter
    pub fn lte(field: impl Into<F>, value: Value) -> Self {
        Self::new(field, FilterOperator::Lte, value)
    }

    /// Create an "in list" filter
    pub fn in_list(field: impl Into<F>, values: Vec<Value>) -> Self {
        Self::new(field, FilterOperator::In, Value::Array(values))
    }
}

impl<F: AsRef<str>> FilterCondition<F> {
    /// The field name as a string
    pub fn field_name(&self) -> &str {
        self.field.as_ref()
    }

    /// Erase the compile-time field type
    pub fn to_untyped(&self) -> FilterCondition<String> {
        FilterCondition {
            field: self.field.as_ref().to_string(),
            op: self.op.clone(),
            value: self.value.clone(),
        }
    }
}
