//! Query results

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,

    /// Present only in cursor-mode, and only when there is a next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Present only in offset-mode; remote engines may omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl PageInfo {
    /// Offset-mode page info with a known total
    pub fn offset(has_next_page: bool, total_count: usize) -> Self {
        Self {
            has_next_page,
            next_cursor: None,
            total_count: Some(total_count),
        }
    }

    /// Cursor-mode page info. `has_next_page` follows the cursor's presence.
    pub fn cursor(next_cursor: Option<String>) -> Self {
        Self {
            has_next_page: next_cursor.is_some(),
            next_cursor,
            total_count: None,
        }
    }
}

/// One page of query results
///
/// Items are a shared, immutable slice; consumers get read-only access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    items: Arc<[T]>,
    page_info: PageInfo,
}

impl<T> QueryResult<T> {
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self {
            items: items.into(),
            page_info,
        }
    }

    /// Items in result order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_page_info_ties_flag_to_cursor() {
        assert!(PageInfo::cursor(Some("MTA=".to_string())).has_next_page);
        assert!(!PageInfo::cursor(None).has_next_page);
        assert_eq!(PageInfo::cursor(None).total_count, None);
    }

    #[test]
    fn test_empty_result() {
        let result: QueryResult<u32> = QueryResult::new(Vec::new(), PageInfo::offset(false, 0));
        assert!(result.is_empty());
        assert_eq!(result.page_info().total_count, Some(0));
        assert!(!result.page_info().has_next_page);
    }

    #[test]
    fn test_result_serialization() {
        let result = QueryResult::new(vec![json!({"id": "a"})], PageInfo::offset(true, 7));
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(
            wire,
            json!({
                "items": [{"id": "a"}],
                "pageInfo": {"hasNextPage": true, "totalCount": 7}
            })
        );
    }
}
