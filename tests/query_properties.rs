//! Query Execution Property Tests
//!
//! Tests for execution invariants:
//! - A page never exceeds its page size
//! - Every returned item satisfies every filter
//! - Returned items respect the sort keys
//! - Offset-mode hasNextPage agrees with totalCount
//! - Cursors continue exactly where the previous page stopped
//! - Identical specs give identical results
//! - Empty collections give empty pages

use querykit::datasource::{DataSource, InMemoryDataSource};
use querykit::engine::{sort_order, Entity, PredicateFilter};
use querykit::mock::generate_user_documents;
use querykit::engine::encode_cursor;
use querykit::query::{
    parse_query_spec, FilterCondition, PaginationSpec, QueryResult, QuerySpec, SortDirection,
    SortSpec,
};
use serde_json::{json, Value};
use std::cmp::Ordering;

// =============================================================================
// Helper Functions
// =============================================================================

fn numbered_items(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"id": format!("item-{:02}", i), "displayName": format!("Item{:02}", i)}))
        .collect()
}

/// 60 items with repeating groups so sort keys tie often
fn mixed_items() -> Vec<Value> {
    (0..60)
        .map(|i| {
            json!({
                "id": format!("m{:02}", i),
                "group": (["red", "green", "blue"][i % 3]),
                "rank": (i * 7) % 11,
                "label": format!("Label {}", (i * 13) % 17),
                "active": i % 4 != 0,
            })
        })
        .collect()
}

fn filter_sets() -> Vec<Vec<FilterCondition>> {
    vec![
        Vec::new(),
        vec![FilterCondition::eq("group", json!("red"))],
        vec![
            FilterCondition::neq("group", json!("blue")),
            FilterCondition::gte("rank", json!(4)),
        ],
        vec![FilterCondition::contains("label", "1")],
        vec![FilterCondition::in_list("rank", vec![json!(1), json!(3), json!(5)])],
        vec![
            FilterCondition::eq("active", json!(true)),
            FilterCondition::lt("rank", json!(9)),
            FilterCondition::starts_with("label", "LABEL"),
        ],
        vec![FilterCondition::eq("group", json!("purple"))],
    ]
}

fn sort_sets() -> Vec<Vec<SortSpec>> {
    vec![
        Vec::new(),
        vec![SortSpec::asc("rank")],
        vec![SortSpec::desc("group"), SortSpec::asc("rank")],
        vec![SortSpec::asc("label"), SortSpec::desc("id")],
    ]
}

fn ids(result: &QueryResult<Value>) -> Vec<String> {
    result.iter().map(|item| item.id().to_string()).collect()
}

fn display_names(result: &QueryResult<Value>) -> Vec<String> {
    result
        .iter()
        .map(|item| item["displayName"].as_str().unwrap().to_string())
        .collect()
}

/// Run every filter/sort combination at several page sizes and indexes
async fn for_each_offset_page<C>(mut check: C)
where
    C: FnMut(&QuerySpec, &QueryResult<Value>),
{
    let source = InMemoryDataSource::new("mixed", mixed_items());

    for filters in filter_sets() {
        for sorting in sort_sets() {
            for page_size in [1, 7, 25, 100] {
                for page_index in [0, 1, 3, 9] {
                    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(page_size))
                        .with_filters(filters.clone())
                        .with_sorting(sorting.clone())
                        .with_page_index(page_index);
                    let result = source.query(&spec).await.unwrap();
                    check(&spec, &result);
                }
            }
        }
    }
}

// =============================================================================
// Invariant Tests
// =============================================================================

/// No page is larger than its page size.
#[tokio::test]
async fn test_pagination_bound() {
    for_each_offset_page(|spec, result| {
        assert!(result.len() <= spec.pagination.page_size);
    })
    .await;
}

/// Every returned item satisfies every filter.
#[tokio::test]
async fn test_filter_correctness() {
    let filter = PredicateFilter::default();
    for_each_offset_page(|spec, result| {
        for item in result.iter() {
            assert!(filter.matches(item, &spec.filters).unwrap());
        }
    })
    .await;
}

/// Adjacent items never appear out of order under the first non-tying key.
#[tokio::test]
async fn test_sort_correctness() {
    for_each_offset_page(|spec, result| {
        for pair in result.items().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            for key in &spec.sorting {
                let ordering = sort_order(&a[key.field.as_str()], &b[key.field.as_str()]);
                let ordering = match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                assert_ne!(ordering, Ordering::Greater, "out of order on {}", key.field);
                if ordering == Ordering::Less {
                    break;
                }
            }
        }
    })
    .await;
}

/// Offset-mode hasNextPage is exactly "more items after this page".
#[tokio::test]
async fn test_offset_total_count_consistency() {
    for_each_offset_page(|spec, result| {
        let total = result.page_info().total_count.unwrap();
        let size = spec.pagination.page_size;
        let index = spec.pagination.page_index.unwrap_or(0);
        assert_eq!(result.page_info().has_next_page, (index + 1) * size < total);
        assert!(result.page_info().next_cursor.is_none());
    })
    .await;
}

/// Following cursors visits every matching item exactly once, in order.
#[tokio::test]
async fn test_cursor_round_trip() {
    let source = InMemoryDataSource::new("mixed", mixed_items());

    for filters in filter_sets() {
        for sorting in sort_sets() {
            let base: QuerySpec = QuerySpec::new(PaginationSpec::first_page(100))
                .with_filters(filters.clone())
                .with_sorting(sorting.clone());
            let expected = ids(&source.query(&base).await.unwrap());

            let mut spec = base.with_page_size(7);
            let mut seen = Vec::new();
            loop {
                let page = source.query(&spec).await.unwrap();
                // Only the unpositioned first page reports a total
                assert_eq!(page.page_info().total_count.is_some(), seen.is_empty());
                seen.extend(ids(&page));
                match &page.page_info().next_cursor {
                    Some(cursor) => {
                        assert!(page.page_info().has_next_page);
                        spec = spec.with_cursor(cursor.clone());
                    }
                    None => {
                        assert!(!page.page_info().has_next_page);
                        break;
                    }
                }
            }

            assert_eq!(seen, expected);
        }
    }
}

/// The same spec twice gives the same result.
#[tokio::test]
async fn test_idempotence() {
    let source = InMemoryDataSource::new("mixed", mixed_items());

    for filters in filter_sets() {
        for sorting in sort_sets() {
            let spec: QuerySpec = QuerySpec::new(PaginationSpec::offset(9, 1))
                .with_filters(filters.clone())
                .with_sorting(sorting.clone())
                .with_page_index(1);
            let first = source.query(&spec).await.unwrap();
            let second = source.query(&spec).await.unwrap();
            assert_eq!(first, second);
        }
    }
}

/// Empty collections give empty, final pages.
#[tokio::test]
async fn test_empty_collection() {
    let source: InMemoryDataSource<Value> = InMemoryDataSource::empty("nothing");

    for filters in filter_sets() {
        for page_index in [0, 4] {
            let spec: QuerySpec = QuerySpec::new(PaginationSpec::offset(10, page_index))
                .with_filters(filters.clone())
                .with_page_index(page_index);
            let result = source.query(&spec).await.unwrap();

            assert!(result.is_empty());
            assert!(!result.page_info().has_next_page);
            assert_eq!(result.page_info().total_count, Some(0));
        }
    }
}

/// Offsets too large for `usize` are past the end, not failures.
#[tokio::test]
async fn test_huge_offsets_are_empty_pages() {
    let source = InMemoryDataSource::new("items", numbered_items(10));

    let raw = json!({"pagination": {"pageSize": 100, "pageIndex": u64::MAX / 50}});
    let spec = parse_query_spec(&raw).unwrap();
    let result = source.query(&spec).await.unwrap();
    assert!(result.is_empty());
    assert!(!result.page_info().has_next_page);
    assert_eq!(result.page_info().total_count, Some(10));

    let spec: QuerySpec = QuerySpec::new(PaginationSpec::cursor(5, encode_cursor(usize::MAX)));
    let result = source.query(&spec).await.unwrap();
    assert!(result.is_empty());
    assert!(!result.page_info().has_next_page);
    assert!(result.page_info().next_cursor.is_none());
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// First page of 25 sequential items.
#[tokio::test]
async fn test_first_page_of_sequential_items() {
    let source = InMemoryDataSource::new("items", numbered_items(25));
    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(10))
        .with_sorting(vec![SortSpec::asc("displayName")])
        .with_page_index(0);

    let result = source.query(&spec).await.unwrap();

    let expected: Vec<String> = (0..10).map(|i| format!("Item{:02}", i)).collect();
    assert_eq!(display_names(&result), expected);
    assert!(result.page_info().has_next_page);
    assert_eq!(result.page_info().total_count, Some(25));
    assert!(result.page_info().next_cursor.is_none());
}

/// Last, partial page of the same items.
#[tokio::test]
async fn test_last_partial_page() {
    let source = InMemoryDataSource::new("items", numbered_items(25));
    let spec: QuerySpec = QuerySpec::new(PaginationSpec::offset(10, 2))
        .with_sorting(vec![SortSpec::asc("displayName")])
        .with_page_index(2);

    let result = source.query(&spec).await.unwrap();

    let expected: Vec<String> = (20..25).map(|i| format!("Item{:02}", i)).collect();
    assert_eq!(display_names(&result), expected);
    assert!(!result.page_info().has_next_page);
    assert_eq!(result.page_info().total_count, Some(25));
}

/// Paging through a LEAD filter returns exactly the 50 leads.
#[tokio::test]
async fn test_lead_filter_across_pages() {
    let source = InMemoryDataSource::new("users", generate_user_documents(100).unwrap());
    let base: QuerySpec = QuerySpec::new(PaginationSpec::offset(15, 0))
        .with_filter(FilterCondition::eq("userType", json!("LEAD")));

    let mut total = 0;
    let mut page_index = 0;
    loop {
        let page = source.query(&base.with_page_index(page_index)).await.unwrap();
        assert!(page.iter().all(|u| u["userType"] == "LEAD"));
        total += page.len();
        if !page.page_info().has_next_page {
            break;
        }
        page_index += 1;
    }

    assert_eq!(total, 50);
}

/// Substring match ignores case.
#[tokio::test]
async fn test_contains_is_case_insensitive() {
    let source = InMemoryDataSource::new(
        "users",
        vec![
            json!({"id": "u1", "email": "alice.smith@example.com"}),
            json!({"id": "u2", "email": "bob@example.com"}),
        ],
    );
    let spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(10))
        .with_filter(FilterCondition::contains("email", "ALICE"));

    let result = source.query(&spec).await.unwrap();

    assert_eq!(ids(&result), ["u1"]);
}

/// A cursor from the first page continues at item 5 with no overlap.
#[tokio::test]
async fn test_cursor_follow_up() {
    let source = InMemoryDataSource::new("items", numbered_items(25));
    let first_spec: QuerySpec = QuerySpec::new(PaginationSpec::first_page(5))
        .with_sorting(vec![SortSpec::asc("displayName")]);

    let first = source.query(&first_spec).await.unwrap();
    let expected_first: Vec<String> = (0..5).map(|i| format!("Item{:02}", i)).collect();
    assert_eq!(display_names(&first), expected_first);
    let cursor = first.page_info().next_cursor.clone().unwrap();

    let second = source.query(&first_spec.with_cursor(cursor)).await.unwrap();

    let expected: Vec<String> = (5..10).map(|i| format!("Item{:02}", i)).collect();
    assert_eq!(display_names(&second), expected);
    assert!(display_names(&first)
        .iter()
        .all(|name| !display_names(&second).contains(name)));
}

/// Counting with no filters and with a filter that matches nothing.
#[tokio::test]
async fn test_get_count() {
    let source = InMemoryDataSource::new("users", generate_user_documents(100).unwrap());

    let none: Vec<FilterCondition> = Vec::new();
    assert_eq!(source.get_count(&none).await.unwrap(), 100);

    let nobody: Vec<FilterCondition> = vec![FilterCondition::eq("userType", json!("ROBOT"))];
    assert_eq!(source.get_count(&nobody).await.unwrap(), 0);
}
