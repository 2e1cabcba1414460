//! Predicate filtering for query execution
//!
//! Every condition must hold (AND). A missing field reads as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::compare::{coerce_to_string, relational, strict_eq};
use super::entity::{read_field, Entity};
use super::errors::{ExecutorError, ExecutorResult};
use crate::query::{FilterCondition, FilterOperator};

/// What to do with a filter operator this build does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownOperatorPolicy {
    /// Let the item through as if the condition held
    #[default]
    FailOpen,
    /// Fail the query
    Reject,
}

/// Evaluates filter conditions against entities
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateFilter {
    unknown_operator: UnknownOperatorPolicy,
}

impl PredicateFilter {
    pub fn new(unknown_operator: UnknownOperatorPolicy) -> Self {
        Self { unknown_operator }
    }

    pub fn unknown_operator_policy(&self) -> UnknownOperatorPolicy {
        self.unknown_operator
    }

    /// Checks if an item matches all conditions
    pub fn matches<T: Entity, F: AsRef<str>>(
        &self,
        item: &T,
        conditions: &[FilterCondition<F>],
    ) -> ExecutorResult<bool> {
        for condition in conditions {
            if !self.matches_condition(item, condition)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Checks if an item matches a single condition
    fn matches_condition<T: Entity, F: AsRef<str>>(
        &self,
        item: &T,
        condition: &FilterCondition<F>,
    ) -> ExecutorResult<bool> {
        let actual = read_field(item, condition.field_name());
        let expected = &condition.value;

        let matched = match &condition.op {
            FilterOperator::Eq => strict_eq(&actual, expected),
            FilterOperator::Neq => !strict_eq(&actual, expected),
            FilterOperator::Contains => lowered(&actual).contains(&lowered(expected)),
            FilterOperator::StartsWith => lowered(&actual).starts_with(&lowered(expected)),
            FilterOperator::EndsWith => lowered(&actual).ends_with(&lowered(expected)),
            FilterOperator::Gt => relational(&actual, expected).map_or(false, |o| o.is_gt()),
            FilterOperator::Lt => relational(&actual, expected).map_or(false, |o| o.is_lt()),
            FilterOperator::Gte => relational(&actual, expected).map_or(false, |o| o.is_ge()),
            FilterOperator::Lte => relational(&actual, expected).map_or(false, |o| o.is_le()),
            FilterOperator::In => in_list(&actual, expected),
            FilterOperator::Other(_) => match self.unknown_operator {
                UnknownOperatorPolicy::FailOpen => true,
                UnknownOperatorPolicy::Reject => {
                    return Err(ExecutorError::unsupported_operator(&condition.op))
                }
            },
        };

        Ok(matched)
    }
}

fn lowered(v: &Value) -> String {
    coerce_to_string(v).to_lowercase()
}

/// Membership test; a non-array candidate list never matches
fn in_list(actual: &Value, candidates: &Value) -> bool {
    candidates
        .as_array()
        .map_or(false, |list| list.iter().any(|c| strict_eq(actual, c)))
}
