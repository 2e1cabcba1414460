//! Query executor
//!
//! Executes a `QuerySpec` against a materialized collection, producing
//! deterministic results.
//!
//! Execution flow (strict order):
//! 1. Filter items by every condition (AND)
//! 2. Apply sort keys (if any), stable
//! 3. Slice one page (cursor-mode or offset-mode)
//! 4. Return the page with its metadata
//!
//! The input collection and the spec are only ever read.

use crate::observability::{log_event_with_fields, Event};
use crate::query::{FilterCondition, PaginationSpec, QueryResult, QuerySpec, SortSpec};

use super::entity::Entity;
use super::errors::ExecutorResult;
use super::filters::{PredicateFilter, UnknownOperatorPolicy};
use super::paginator::Paginator;
use super::sorter::ResultSorter;

/// In-memory query executor
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryExecutor {
    filter: PredicateFilter,
}

impl QueryExecutor {
    /// Creates an executor with the given unknown-operator policy
    pub fn new(unknown_operator: UnknownOperatorPolicy) -> Self {
        Self {
            filter: PredicateFilter::new(unknown_operator),
        }
    }

    pub fn unknown_operator_policy(&self) -> UnknownOperatorPolicy {
        self.filter.unknown_operator_policy()
    }

    /// Executes a spec and returns one page.
    ///
    /// Same spec + same items = same result.
    pub fn execute<T: Entity, F: AsRef<str>>(
        &self,
        items: &[T],
        spec: &QuerySpec<F>,
    ) -> ExecutorResult<QueryResult<T>> {
        self.run(items, &spec.filters, &spec.sorting, &spec.pagination)
    }

    /// Executes the stages from their parts. Engines that push some filters
    /// down to a store use this to run only the remainder in memory.
    pub fn run<T: Entity, FF: AsRef<str>, SF: AsRef<str>>(
        &self,
        items: &[T],
        filters: &[FilterCondition<FF>],
        sorting: &[SortSpec<SF>],
        pagination: &PaginationSpec,
    ) -> ExecutorResult<QueryResult<T>> {
        self.note_unknown_operators(filters);

        // Step 1: Filter
        let mut matched = self.filter_items(items, filters)?;

        // Step 2: Sort
        ResultSorter::sort(&mut matched, sorting);

        // Steps 3-4: Paginate
        Ok(Paginator::paginate(&matched, pagination))
    }

    /// Counts the items matching `filters`
    pub fn count<T: Entity, F: AsRef<str>>(
        &self,
        items: &[T],
        filters: &[FilterCondition<F>],
    ) -> ExecutorResult<usize> {
        self.note_unknown_operators(filters);
        Ok(self.filter_items(items, filters)?.len())
    }

    fn filter_items<'a, T: Entity, F: AsRef<str>>(
        &self,
        items: &'a [T],
        filters: &[FilterCondition<F>],
    ) -> ExecutorResult<Vec<&'a T>> {
        let mut matched = Vec::new();
        for item in items {
            if self.filter.matches(item, filters)? {
                matched.push(item);
            }
        }
        Ok(matched)
    }

    fn note_unknown_operators<F: AsRef<str>>(&self, filters: &[FilterCondition<F>]) {
        if self.unknown_operator_policy() != UnknownOperatorPolicy::FailOpen {
            return;
        }
        for filter in filters.iter().filter(|f| !f.op.is_known()) {
            log_event_with_fields(
                Event::UnknownOperatorPassed,
                &[("field", filter.field_name()), ("op", filter.op.as_str())],
            );
        }
    }
}
