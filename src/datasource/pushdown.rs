//! # Push-down / Post-fetch Execution
//!
//! Adapts a backing store that can evaluate only some filter operators
//! natively. Filters are split into a pushed subset, sent to the store, and a
//! post-fetch subset, applied in memory to what the store returns together
//! with sorting and pagination. Callers never see the split.
//!
//! In strict mode, operators the store cannot evaluate are rejected with
//! [`DataSourceError::Unsupported`] instead of being post-fetched.

use std::collections::HashSet;

use async_trait::async_trait;

use super::errors::{DataSourceError, DataSourceResult};
use super::traits::{Capabilities, DataSource};
use crate::config::QueryConfig;
use crate::engine::{Entity, QueryExecutor};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{FilterCondition, FilterOperator, QueryResult, QuerySpec};

/// A backing store with native support for some filter operators
#[async_trait]
pub trait NativeStore: Send + Sync {
    /// Entity type the store holds
    type Item: Entity + 'static;

    fn name(&self) -> &str;

    /// Operators the store evaluates natively
    fn supported_operators(&self) -> &[FilterOperator];

    /// Fetch every item matching all of `pushed`. Failures of any kind,
    /// network timeouts included, map to `ExecutionFailed`.
    async fn fetch(&self, pushed: &[FilterCondition]) -> DataSourceResult<Vec<Self::Item>>;
}

/// Partition of a filter list between the store and post-fetch evaluation.
/// Both halves keep the original relative order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSplit {
    pub pushed: Vec<FilterCondition>,
    pub post_fetch: Vec<FilterCondition>,
}

impl FilterSplit {
    /// Split `filters` by operator support
    pub fn split<F: AsRef<str>>(filters: &[FilterCondition<F>], supported: &[FilterOperator]) -> Self {
        let supported: HashSet<&FilterOperator> = supported.iter().collect();

        let mut split = FilterSplit::default();
        for filter in filters {
            let filter = filter.to_untyped();
            if supported.contains(&filter.op) {
                split.pushed.push(filter);
            } else {
                split.post_fetch.push(filter);
            }
        }
        split
    }

    /// Returns true if everything runs inside the store
    pub fn is_fully_pushed(&self) -> bool {
        self.post_fetch.is_empty()
    }
}

/// DataSource over a [`NativeStore`]
pub struct PushdownDataSource<S> {
    store: S,
    executor: QueryExecutor,
    strict: bool,
}

impl<S> PushdownDataSource<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            executor: QueryExecutor::default(),
            strict: false,
        }
    }

    /// Adapter honouring `strict_pushdown` and the unknown-operator policy
    pub fn from_config(store: S, config: &QueryConfig) -> Self {
        Self::new(store)
            .strict(config.strict_pushdown)
            .with_executor(config.executor())
    }

    /// Reject operators the store cannot evaluate instead of post-fetching
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Executor used for the post-fetch stages
    pub fn with_executor(mut self, executor: QueryExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl<S: NativeStore> PushdownDataSource<S> {
    fn plan<F: AsRef<str>>(&self, filters: &[FilterCondition<F>]) -> DataSourceResult<FilterSplit> {
        let split = FilterSplit::split(filters, self.store.supported_operators());

        if self.strict {
            if let Some(rejected) = split.post_fetch.first() {
                return Err(DataSourceError::unsupported(format!(
                    "filter operator `{}` on store {}",
                    rejected.op,
                    self.store.name()
                )));
            }
        }

        let pushed = split.pushed.len().to_string();
        let post_fetch = split.post_fetch.len().to_string();
        log_event_with_fields(
            Event::FilterSplit,
            &[
                ("post_fetch", post_fetch.as_str()),
                ("pushed", pushed.as_str()),
                ("store", self.store.name()),
            ],
        );

        Ok(split)
    }
}

#[async_trait]
impl<S, F> DataSource<S::Item, F> for PushdownDataSource<S>
where
    S: NativeStore,
    F: AsRef<str> + Sync + 'static,
{
    fn name(&self) -> &str {
        self.store.name()
    }

    async fn query(&self, spec: &QuerySpec<F>) -> DataSourceResult<QueryResult<S::Item>> {
        let split = self.plan(&spec.filters)?;
        let fetched = self.store.fetch(&split.pushed).await?;

        Ok(self
            .executor
            .run(&fetched, &split.post_fetch, &spec.sorting, &spec.pagination)?)
    }

    async fn get_by_id(&self, id: &str) -> DataSourceResult<Option<S::Item>> {
        let by_id: Vec<FilterCondition> =
            vec![FilterCondition::eq("id", serde_json::Value::String(id.to_string()))];
        let split = FilterSplit::split(&by_id, self.store.supported_operators());

        let fetched = self.store.fetch(&split.pushed).await?;
        Ok(fetched.into_iter().find(|item| item.id() == id))
    }

    async fn get_count(&self, filters: &[FilterCondition<F>]) -> DataSourceResult<usize> {
        let split = self.plan(filters)?;
        let fetched = self.store.fetch(&split.pushed).await?;

        Ok(self.executor.count(&fetched, &split.post_fetch)?)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}
