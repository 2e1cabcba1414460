//! Page slicing
//!
//! Both modes slice `[start, start + page_size)` out of the filtered, sorted
//! list and set `has_next_page = start + page_size < total`. Slicing past the
//! end is an empty page, never an error; offsets beyond `usize` saturate and
//! land past the end.
//!
//! A request with neither `pageIndex` nor a cursor is answered as offset
//! page 0, and additionally carries a `nextCursor` so a cursor sequence can
//! start from it.

use super::cursor::{decode_cursor, encode_cursor};
use crate::query::{PageInfo, PaginationMode, PaginationSpec, QueryResult};

/// Slices a result list into one page
pub struct Paginator;

impl Paginator {
    /// Cut one page out of `items` and clone it into a result
    pub fn paginate<T: Clone>(items: &[&T], pagination: &PaginationSpec) -> QueryResult<T> {
        let total = items.len();
        let page_size = pagination.page_size;

        match pagination.mode() {
            PaginationMode::Cursor(cursor) => {
                // Undecodable cursors restart from the beginning
                let start = decode_cursor(cursor).unwrap_or(0);
                let end = start.saturating_add(page_size);
                let has_next_page = end < total;

                let next_cursor = has_next_page.then(|| encode_cursor(end));
                QueryResult::new(Self::slice(items, start, end), PageInfo::cursor(next_cursor))
            }
            PaginationMode::Offset { page_index } => {
                let start = page_index.saturating_mul(page_size);
                let end = start.saturating_add(page_size);
                let has_next_page = end < total;

                let mut page_info = PageInfo::offset(has_next_page, total);
                if has_next_page && pagination.is_unpositioned() {
                    page_info.next_cursor = Some(encode_cursor(end));
                }

                QueryResult::new(Self::slice(items, start, end), page_info)
            }
        }
    }

    fn slice<T: Clone>(items: &[&T], start: usize, end: usize) -> Vec<T> {
        let total = items.len();
        let start = start.min(total);
        let end = end.min(total);
        items[start..end].iter().map(|item| (*item).clone()).collect()
    }
}
