//! # In-Memory DataSource
//!
//! Holds a collection behind a read-write lock and executes queries with the
//! in-memory engine. A query holds the read lock for its whole run, so the
//! collection never changes underneath a single call. Nothing is promised
//! across calls: writes between two page requests may shift offsets.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use async_trait::async_trait;

use super::errors::{DataSourceError, DataSourceResult};
use super::traits::{Capabilities, DataSource};
use crate::engine::{Entity, QueryExecutor};
use crate::query::{FilterCondition, QueryResult, QuerySpec};

/// An in-memory collection
#[derive(Debug, Clone)]
pub struct InMemoryDataSource<T> {
    name: String,
    items: Arc<RwLock<Vec<T>>>,
    executor: QueryExecutor,
}

impl<T: Entity> InMemoryDataSource<T> {
    /// Create a source over `items`
    pub fn new(name: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            name: name.into(),
            items: Arc::new(RwLock::new(items)),
            executor: QueryExecutor::default(),
        }
    }

    /// Create an empty source
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Use a specific executor (e.g. one that rejects unknown operators)
    pub fn with_executor(mut self, executor: QueryExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Append an item
    pub fn insert(&self, item: T) -> DataSourceResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| DataSourceError::execution_failed("collection lock poisoned"))?;
        items.push(item);
        Ok(())
    }

    /// Replace the whole collection
    pub fn replace_all(&self, replacement: Vec<T>) -> DataSourceResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| DataSourceError::execution_failed("collection lock poisoned"))?;
        *items = replacement;
        Ok(())
    }

    /// Number of items held
    pub fn len(&self) -> DataSourceResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DataSourceResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> DataSourceResult<RwLockReadGuard<'_, Vec<T>>> {
        self.items
            .read()
            .map_err(|_| DataSourceError::execution_failed("collection lock poisoned"))
    }
}

#[async_trait]
impl<T, F> DataSource<T, F> for InMemoryDataSource<T>
where
    T: Entity + 'static,
    F: AsRef<str> + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn query(&self, spec: &QuerySpec<F>) -> DataSourceResult<QueryResult<T>> {
        let items = self.read()?;
        Ok(self.executor.execute(&items, spec)?)
    }

    async fn get_by_id(&self, id: &str) -> DataSourceResult<Option<T>> {
        let items = self.read()?;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn get_count(&self, filters: &[FilterCondition<F>]) -> DataSourceResult<usize> {
        let items = self.read()?;
        Ok(self.executor.count(&items, filters)?)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{PageInfo, PaginationSpec, SortSpec};
    use serde_json::{json, Value};

    fn users() -> Vec<Value> {
        vec![
            json!({"id": "u1", "name": "Carol", "role": "admin"}),
            json!({"id": "u2", "name": "Alice", "role": "member"}),
            json!({"id": "u3", "name": "Bob", "role": "member"}),
        ]
    }

    #[tokio::test]
    async fn test_query() {
        let source = InMemoryDataSource::new("users", users());
        let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(2))
            .with_sorting(vec![SortSpec::asc("name")]);

        let result = source.query(&spec).await.unwrap();

        let ids: Vec<&str> = result.iter().map(|u| u.id()).collect();
        assert_eq!(ids, ["u2", "u3"]);
        assert_eq!(result.page_info().total_count, Some(3));

        let last = source.query(&spec.with_page_index(1)).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last.page_info(), &PageInfo::offset(false, 3));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let source = InMemoryDataSource::new("users", users());

        let found = DataSource::<Value, String>::get_by_id(&source, "u3").await.unwrap();
        assert_eq!(found.unwrap()["name"], "Bob");

        let missing = DataSource::<Value, String>::get_by_id(&source, "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_count() {
        let source = InMemoryDataSource::new("users", users());

        let all: Vec<FilterCondition> = Vec::new();
        assert_eq!(source.get_count(&all).await.unwrap(), 3);

        let members: Vec<FilterCondition> = vec![FilterCondition::eq("role", json!("member"))];
        assert_eq!(source.get_count(&members).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_is_visible_to_later_queries() {
        let source = InMemoryDataSource::empty("users");
        assert!(source.is_empty().unwrap());

        source.insert(json!({"id": "u9", "name": "Zed"})).unwrap();

        let spec: QuerySpec = QuerySpec::default();
        assert_eq!(source.query(&spec).await.unwrap().len(), 1);
        assert_eq!(source.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_capabilities() {
        let source = InMemoryDataSource::new("users", users());
        assert_eq!(DataSource::<Value, String>::capabilities(&source), Capabilities::full());
    }
}
