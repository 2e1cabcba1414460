//! DataSource Contract Tests
//!
//! Tests for the backend contract as seen through a collection service:
//! - Every backend answers the same spec with the same page
//! - Optional operations fail with a typed Unsupported error
//! - Push-down splitting is invisible to callers
//! - Backend faults surface as execution failures

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use querykit::config::QueryConfig;
use querykit::datasource::{
    Capabilities, DataSource, DataSourceError, DataSourceResult, InMemoryDataSource, NativeStore,
    PushdownDataSource, OP_GET_BY_ID,
};
use querykit::engine::{Entity, PredicateFilter};
use querykit::mock::{generate_users, mock_users_source, User, UserField, UserType};
use querykit::query::{
    FilterCondition, FilterOperator, PaginationSpec, QueryResult, QuerySpec, SortSpec,
};
use querykit::service::{CollectionService, FailureKind, Outcome};
use serde_json::{json, Value};

// =============================================================================
// Helper Backends
// =============================================================================

/// A remote-style store holding mock users that evaluates only equality and
/// `in` natively
struct UserStore {
    users: Vec<User>,
    supported: Vec<FilterOperator>,
    fetches: Mutex<usize>,
}

impl UserStore {
    fn new(count: usize) -> Self {
        Self {
            users: generate_users(count),
            supported: vec![FilterOperator::Eq, FilterOperator::In],
            fetches: Mutex::new(0),
        }
    }
}

#[async_trait]
impl NativeStore for UserStore {
    type Item = User;

    fn name(&self) -> &str {
        "user-store"
    }

    fn supported_operators(&self) -> &[FilterOperator] {
        &self.supported
    }

    async fn fetch(&self, pushed: &[FilterCondition]) -> DataSourceResult<Vec<User>> {
        for condition in pushed {
            assert!(self.supported.contains(&condition.op));
        }
        *self.fetches.lock().unwrap() += 1;

        let filter = PredicateFilter::default();
        Ok(self
            .users
            .iter()
            .filter(|user| filter.matches(*user, pushed).unwrap())
            .cloned()
            .collect())
    }
}

/// A backend that implements only `query`, and fails it
struct Offline;

#[async_trait]
impl DataSource<Value> for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn query(&self, _spec: &QuerySpec) -> DataSourceResult<QueryResult<Value>> {
        Err(DataSourceError::execution_failed("connection refused"))
    }
}

fn typed_spec() -> QuerySpec<UserField> {
    QuerySpec::new(PaginationSpec::first_page(8))
        .with_filters(vec![
            FilterCondition::eq(UserField::Active, json!(true)),
            FilterCondition::ends_with(UserField::Email, "@EXAMPLE.COM"),
            FilterCondition::gt(UserField::Score, json!(20)),
        ])
        .with_sorting(vec![
            SortSpec::asc(UserField::UserType),
            SortSpec::desc(UserField::Score),
        ])
}

fn user_ids(result: &QueryResult<User>) -> Vec<String> {
    result.iter().map(|u| u.id.clone()).collect()
}

// =============================================================================
// Backend Equivalence Tests
// =============================================================================

/// In-memory and push-down backends agree page by page.
#[tokio::test]
async fn test_backends_agree() {
    let memory: CollectionService<User, UserField> =
        CollectionService::new("users", Arc::new(mock_users_source(120)));
    let pushdown: CollectionService<User, UserField> =
        CollectionService::new("users", Arc::new(PushdownDataSource::new(UserStore::new(120))));

    for page_index in 0..6 {
        let spec = typed_spec().with_page_index(page_index);
        let a = memory.query(&spec).await.unwrap();
        let b = pushdown.query(&spec).await.unwrap();
        assert_eq!(user_ids(&a), user_ids(&b));
        assert_eq!(a.page_info(), b.page_info());
    }

    let filters = typed_spec().filters;
    assert_eq!(
        memory.get_count(&filters).await.unwrap(),
        pushdown.get_count(&filters).await.unwrap()
    );
}

/// Typed field names reach the engine as their wire names.
#[tokio::test]
async fn test_typed_filters_hold() {
    let service: CollectionService<User, UserField> =
        CollectionService::new("users", Arc::new(mock_users_source(120)));

    let result = service.query(&typed_spec()).await.unwrap();

    assert!(!result.is_empty());
    for user in result.iter() {
        assert!(user.active);
        assert!(user.score > 20);
        assert!(user.email.ends_with("@example.com"));
    }
}

// =============================================================================
// Push-down Tests
// =============================================================================

/// Strict push-down rejects operators the store cannot evaluate.
#[tokio::test]
async fn test_strict_pushdown_is_unsupported() {
    let config = QueryConfig::from_json(r#"{"strict_pushdown": true}"#).unwrap();
    let source = PushdownDataSource::from_config(UserStore::new(10), &config);
    let service: CollectionService<User, UserField> =
        CollectionService::new("users", Arc::new(source));

    let err = service.query(&typed_spec()).await.unwrap_err();

    assert!(err.is_unsupported());
    assert_eq!(service.metrics().snapshot().unsupported_calls, 1);
}

/// Lookup by id works through a store that only sees pushed filters.
#[tokio::test]
async fn test_pushdown_lookup() {
    let source = Arc::new(PushdownDataSource::new(UserStore::new(30)));
    let service: CollectionService<User> = CollectionService::new("users", source.clone());

    let user = service.get_by_id("user-0007").await.unwrap().unwrap();
    assert_eq!(user.user_type, UserType::Admin);
    assert!(service.get_by_id("user-9999").await.unwrap().is_none());
    assert_eq!(*source.store().fetches.lock().unwrap(), 2);
}

// =============================================================================
// Optional Operation Tests
// =============================================================================

/// Query-only backends report Unsupported, and callers can fall back to an
/// `eq` query.
#[tokio::test]
async fn test_unsupported_lookup_falls_back_to_query() {
    struct QueryOnly(InMemoryDataSource<Value>);

    #[async_trait]
    impl DataSource<Value> for QueryOnly {
        fn name(&self) -> &str {
            "query-only"
        }

        async fn query(&self, spec: &QuerySpec) -> DataSourceResult<QueryResult<Value>> {
            self.0.query(spec).await
        }
    }

    let docs = vec![
        json!({"id": "a", "name": "first"}),
        json!({"id": "b", "name": "second"}),
    ];
    let source = QueryOnly(InMemoryDataSource::new("docs", docs));
    assert_eq!(source.capabilities(), Capabilities::query_only());
    let service: CollectionService<Value> = CollectionService::new("docs", Arc::new(source));

    let err = service.get_by_id("b").await.unwrap_err();
    assert_eq!(err, DataSourceError::unsupported(OP_GET_BY_ID));

    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(1))
        .with_filter(FilterCondition::eq("id", json!("b")));
    let found = service.query(&spec).await.unwrap();
    assert_eq!(found.items()[0]["name"], "second");
}

/// Rejecting unknown operators surfaces as Unsupported.
#[tokio::test]
async fn test_rejected_operator_is_unsupported() {
    let config = QueryConfig::from_json(r#"{"unknown_operator": "reject"}"#).unwrap();
    let docs = vec![json!({"id": "a", "name": "x"})];
    let source = InMemoryDataSource::new("docs", docs).with_executor(config.executor());
    let service: CollectionService<Value> = CollectionService::new("docs", Arc::new(source));

    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(5)).with_filter(
        FilterCondition::new("name", FilterOperator::from_name("like"), json!("x")),
    );
    let outcome: Outcome<_> = service.query(&spec).await.into();

    assert_eq!(outcome.failure().unwrap().kind, FailureKind::Unsupported);
}

/// Unknown operators pass through by default.
#[tokio::test]
async fn test_unknown_operator_fails_open() {
    let docs = vec![json!({"id": "a"}), json!({"id": "b"})];
    let service: CollectionService<Value> =
        CollectionService::new("docs", Arc::new(InMemoryDataSource::new("docs", docs)));

    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(5)).with_filter(
        FilterCondition::new("id", FilterOperator::from_name("regex"), json!("^a")),
    );

    assert_eq!(service.query(&spec).await.unwrap().len(), 2);
}

// =============================================================================
// Failure Tests
// =============================================================================

/// Backend faults are execution failures, not empty pages.
#[tokio::test]
async fn test_backend_fault_is_execution_failure() {
    let service: CollectionService<Value> = CollectionService::new("docs", Arc::new(Offline));

    let outcome: Outcome<_> = service.query(&QuerySpec::default()).await.into();

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["kind"], "executionFailed");
    assert_eq!(
        value["error"]["message"],
        "query execution failed: connection refused"
    );
    assert_eq!(service.metrics().snapshot().queries_failed, 1);
}

/// An empty match is a successful empty page.
#[tokio::test]
async fn test_no_match_is_success() {
    let service: CollectionService<User> =
        CollectionService::new("users", Arc::new(mock_users_source(10)));

    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(5))
        .with_filter(FilterCondition::eq("email", json!("nobody@example.com")));
    let result = service.query(&spec).await.unwrap();

    assert!(result.is_empty());
    assert!(!result.page_info().has_next_page);
    assert!(result.iter().all(|u| !u.id().is_empty()));
}
