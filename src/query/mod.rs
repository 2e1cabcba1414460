//! Query contract
//!
//! Backend-agnostic data shapes for filter, sort and pagination requests and
//! their paginated results. No execution behavior lives here; see `engine`
//! for the in-memory executor and `datasource` for the backend contract.

mod filter;
mod pagination;
mod result;
mod sort;
mod spec;
pub mod validate;

pub use filter::{FilterCondition, FilterOperator};
pub use pagination::{
    PaginationMode, PaginationSpec, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};
pub use result::{PageInfo, QueryResult};
pub use sort::{SortDirection, SortSpec};
pub use spec::QuerySpec;
pub use validate::{parse_query_spec, validate_spec, ValidationError, ValidationResult};
