//! # Query Specification
//!
//! A `QuerySpec` is plain data. Engines read it and never change it; every
//! mutator here returns a new spec instead of editing in place.

use serde::{Deserialize, Serialize};

use super::filter::FilterCondition;
use super::pagination::PaginationSpec;
use super::sort::SortSpec;

/// Declarative filter + sort + pagination request
///
/// `F` is the compile-time field-name universe. Untyped callers use `String`;
/// typed callers use an enum implementing `AsRef<str>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec<F = String> {
    /// Conditions combined with AND
    #[serde(default = "Vec::new")]
    pub filters: Vec<FilterCondition<F>>,

    /// Sort keys in priority order
    #[serde(default = "Vec::new")]
    pub sorting: Vec<SortSpec<F>>,

    /// Page selection (required)
    pub pagination: PaginationSpec,
}

impl<F> QuerySpec<F> {
    /// A spec with no filters or sorting
    pub fn new(pagination: PaginationSpec) -> Self {
        Self {
            filters: Vec::new(),
            sorting: Vec::new(),
            pagination,
        }
    }
}

impl<F: Clone> QuerySpec<F> {
    /// Replace the filters. Pagination restarts at the first page because
    /// outstanding offsets and cursors address the old result set.
    pub fn with_filters(&self, filters: Vec<FilterCondition<F>>) -> Self {
        Self {
            filters,
            sorting: self.sorting.clone(),
            pagination: self.first_page(),
        }
    }

    /// Append one filter, restarting at the first page
    pub fn with_filter(&self, filter: FilterCondition<F>) -> Self {
        let mut filters = self.filters.clone();
        filters.push(filter);
        self.with_filters(filters)
    }

    /// Replace the sort keys, restarting at the first page
    pub fn with_sorting(&self, sorting: Vec<SortSpec<F>>) -> Self {
        Self {
            filters: self.filters.clone(),
            sorting,
            pagination: self.first_page(),
        }
    }

    /// Replace the pagination request
    pub fn with_pagination(&self, pagination: PaginationSpec) -> Self {
        Self {
            filters: self.filters.clone(),
            sorting: self.sorting.clone(),
            pagination,
        }
    }

    /// Jump to an offset-mode page, keeping the page size
    pub fn with_page_index(&self, page_index: usize) -> Self {
        self.with_pagination(PaginationSpec::offset(
            self.pagination.page_size,
            page_index,
        ))
    }

    /// Continue from a cursor, keeping the page size
    pub fn with_cursor(&self, cursor: impl Into<String>) -> Self {
        self.with_pagination(PaginationSpec::cursor(self.pagination.page_size, cursor))
    }

    /// Change the page size, restarting at the first page
    pub fn with_page_size(&self, page_size: usize) -> Self {
        self.with_pagination(PaginationSpec::first_page(page_size))
    }

    fn first_page(&self) -> PaginationSpec {
        PaginationSpec::first_page(self.pagination.page_size)
    }
}

impl<F> Default for QuerySpec<F> {
    fn default() -> Self {
        Self::new(PaginationSpec::default())
    }
}
