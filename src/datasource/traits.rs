//! The `DataSource` contract
//!
//! Every execution strategy (in-memory, remote store, push-down hybrid)
//! implements this trait. `query` is required; `get_by_id` and `get_count`
//! are optional and default to [`DataSourceError::Unsupported`].
//!
//! The methods are async so remote backends fit the same contract; the
//! in-memory implementation never suspends.

use async_trait::async_trait;

use super::errors::{DataSourceError, DataSourceResult};
use crate::query::{FilterCondition, QueryResult, QuerySpec};

/// Operation name reported when `get_by_id` is not implemented
pub const OP_GET_BY_ID: &str = "getById";

/// Operation name reported when `get_count` is not implemented
pub const OP_GET_COUNT: &str = "getCount";

/// Optional operations a source implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub get_by_id: bool,
    pub get_count: bool,
}

impl Capabilities {
    /// `query` only
    pub fn query_only() -> Self {
        Self::default()
    }

    /// Every optional operation
    pub fn full() -> Self {
        Self {
            get_by_id: true,
            get_count: true,
        }
    }
}

/// Binds one entity type and field-name universe to one backing store
#[async_trait]
pub trait DataSource<T, F = String>: Send + Sync
where
    T: Send + 'static,
    F: Sync + 'static,
{
    /// Name of the backing store, for logs
    fn name(&self) -> &str;

    /// Execute filter, sort and paginate. Never mutates `spec`; an empty
    /// match is an empty page, not an error.
    async fn query(&self, spec: &QuerySpec<F>) -> DataSourceResult<QueryResult<T>>;

    /// Look up one entity. A missing id is `Ok(None)`.
    async fn get_by_id(&self, _id: &str) -> DataSourceResult<Option<T>> {
        Err(DataSourceError::unsupported(OP_GET_BY_ID))
    }

    /// Count entities matching `filters` (all entities when empty)
    async fn get_count(&self, _filters: &[FilterCondition<F>]) -> DataSourceResult<usize> {
        Err(DataSourceError::unsupported(OP_GET_COUNT))
    }

    /// Optional operations this source implements
    fn capabilities(&self) -> Capabilities {
        Capabilities::query_only()
    }
}
