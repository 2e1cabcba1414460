//! In-memory execution engine
//!
//! Given a materialized collection and a `QuerySpec`, produces one page of
//! results synchronously, deterministically and without touching the input.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter: every condition must hold (AND)
//! 2. Sort: keys as successive tie-breakers, stable
//! 3. Paginate: cursor-mode or offset-mode, inferred from the request
//!
//! The engine trusts its input: shape validation happens in
//! `query::validate` before a spec ever reaches it.

mod compare;
mod cursor;
mod entity;
mod errors;
mod executor;
mod filters;
mod paginator;
mod sorter;

pub use compare::{coerce_to_string, relational, sort_order, strict_eq};
pub use cursor::{decode_cursor, encode_cursor};
pub use entity::Entity;
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use executor::QueryExecutor;
pub use filters::{PredicateFilter, UnknownOperatorPolicy};
pub use paginator::Paginator;
pub use sorter::ResultSorter;
