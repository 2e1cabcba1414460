//! Collection Service
//!
//! The thin layer callers talk to. A service is bound to exactly one
//! [`DataSource`](crate::datasource::DataSource) at construction and forwards
//! every operation to it.

mod collection;
mod outcome;

pub use collection::CollectionService;
pub use outcome::{Failure, FailureKind, Outcome};
