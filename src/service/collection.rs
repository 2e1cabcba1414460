//! # Collection Service
//!
//! Binds one data source to a named entity and forwards `query`,
//! `get_by_id` and `get_count` unchanged. Holds no query state; cloning is
//! cheap and clones share the same source and metrics.

use std::sync::Arc;

use crate::datasource::{DataSource, DataSourceError, DataSourceResult};
use crate::observability::{log_event_with_fields, Event, QueryMetrics};
use crate::query::{FilterCondition, QueryResult, QuerySpec};

/// Pass-through service over one [`DataSource`]
pub struct CollectionService<T, F = String>
where
    T: Send + 'static,
    F: Sync + 'static,
{
    entity: String,
    source: Arc<dyn DataSource<T, F>>,
    metrics: Arc<QueryMetrics>,
}

impl<T, F> Clone for CollectionService<T, F>
where
    T: Send + 'static,
    F: Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            source: Arc::clone(&self.source),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<T, F> CollectionService<T, F>
where
    T: Send + 'static,
    F: Sync + 'static,
{
    pub fn new(entity: impl Into<String>, source: Arc<dyn DataSource<T, F>>) -> Self {
        let service = Self {
            entity: entity.into(),
            source,
            metrics: Arc::new(QueryMetrics::new()),
        };
        log_event_with_fields(
            Event::SourceBound,
            &[
                ("entity", service.entity.as_str()),
                ("source", service.source.name()),
            ],
        );
        service
    }

    /// Report into a shared metrics registry
    pub fn with_metrics(mut self, metrics: Arc<QueryMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn source(&self) -> &Arc<dyn DataSource<T, F>> {
        &self.source
    }

    pub fn metrics(&self) -> &Arc<QueryMetrics> {
        &self.metrics
    }

    /// Execute a query spec
    pub async fn query(&self, spec: &QuerySpec<F>) -> DataSourceResult<QueryResult<T>> {
        let outcome = self.source.query(spec).await;

        match &outcome {
            Ok(result) => {
                self.metrics.record_query(result.len());
                let items = result.len().to_string();
                let has_next = result.page_info().has_next_page.to_string();
                log_event_with_fields(
                    Event::QueryExecuted,
                    &[
                        ("entity", self.entity.as_str()),
                        ("has_next_page", has_next.as_str()),
                        ("items", items.as_str()),
                    ],
                );
            }
            Err(err) => self.note_failure("query", err),
        }

        outcome
    }

    /// Look up one entity by id. A missing id is `Ok(None)`.
    pub async fn get_by_id(&self, id: &str) -> DataSourceResult<Option<T>> {
        self.metrics.increment_lookups();
        let outcome = self.source.get_by_id(id).await;
        if let Err(err) = &outcome {
            self.note_failure("getById", err);
        }
        outcome
    }

    /// Count entities matching `filters`
    pub async fn get_count(&self, filters: &[FilterCondition<F>]) -> DataSourceResult<usize> {
        self.metrics.increment_counts();
        let outcome = self.source.get_count(filters).await;
        if let Err(err) = &outcome {
            self.note_failure("getCount", err);
        }
        outcome
    }

    fn note_failure(&self, operation: &str, err: &DataSourceError) {
        let message = err.to_string();
        let fields = [
            ("entity", self.entity.as_str()),
            ("error", message.as_str()),
            ("operation", operation),
        ];

        if err.is_unsupported() {
            self.metrics.increment_unsupported();
            log_event_with_fields(Event::OperationUnsupported, &fields);
        } else {
            self.metrics.increment_failures();
            log_event_with_fields(Event::QueryFailed, &fields);
        }
    }
}
