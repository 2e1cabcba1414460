//! Result sorting for query execution
//!
//! Sort keys are applied as successive tie-breakers. The underlying sort is
//! `slice::sort_by`, which is stable, so fully tied items keep their
//! collection order.

use std::cmp::Ordering;

use super::compare::sort_order;
use super::entity::{read_field, Entity};
use crate::query::{SortDirection, SortSpec};

/// Sorts filtered items
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts items according to the sort keys. No-op when `keys` is empty.
    pub fn sort<T: Entity, F: AsRef<str>>(items: &mut [&T], keys: &[SortSpec<F>]) {
        if keys.is_empty() {
            return;
        }

        items.sort_by(|a, b| Self::compare(*a, *b, keys));
    }

    /// Compares two items key by key until one key breaks the tie
    pub fn compare<T: Entity, F: AsRef<str>>(a: &T, b: &T, keys: &[SortSpec<F>]) -> Ordering {
        for key in keys {
            let field = key.field_name();
            let ordering = sort_order(&read_field(a, field), &read_field(b, field));

            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
