//! Value comparison rules shared by filtering and sorting
//!
//! - Equality: JSON equality, except numbers compare by numeric value
//!   (`1 == 1.0`).
//! - Relational filters: only same-typed scalars are comparable. Numbers
//!   compare numerically and agree with equality (`-0.0 == 0`), strings lexically by byte, bools `false < true`.
//!   Any other pairing, including anything against `null`, is not comparable
//!   and the filter yields `false`.
//! - Sorting: a total order. Comparable pairs use the relational rule;
//!   mixed types fall back to `null < bool < number < string < array < object`.

use std::cmp::Ordering;

use serde_json::Value;

/// Strict equality
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => a == b,
    }
}

/// Relational comparison for `gt`/`lt`/`gte`/`lte`.
///
/// Returns `None` when the pair is not comparable.
pub fn relational(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total ordering used by the sort stage
pub fn sort_order(a: &Value, b: &Value) -> Ordering {
    match relational(a, b) {
        Some(ordering) => ordering,
        None => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// String coercion used by the substring operators.
///
/// Strings pass through unquoted; everything else uses its JSON text
/// (`null`, `true`, `42`, `[1,2]`).
pub fn coerce_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
