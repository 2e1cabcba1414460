//! # Pagination
//!
//! Exactly one pagination mode is active per request and it is inferred,
//! never declared: a present, non-empty cursor selects cursor-mode; anything
//! else is offset-mode using `pageIndex` (default 0).

use serde::{Deserialize, Serialize};

/// Smallest accepted page size
pub const MIN_PAGE_SIZE: usize = 1;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when a request does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 20;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Pagination request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSpec {
    /// Items per page (1..=100, default 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Zero-based page number for offset-mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<usize>,

    /// Opaque cursor issued by a previous cursor-mode response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// The pagination mode selected by a [`PaginationSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode<'a> {
    /// Slice by `page_index * page_size`
    Offset { page_index: usize },
    /// Continue from an engine-issued cursor
    Cursor(&'a str),
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self::first_page(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationSpec {
    /// First page in offset-mode
    pub fn first_page(page_size: usize) -> Self {
        Self {
            page_size,
            page_index: None,
            cursor: None,
        }
    }

    /// A specific page in offset-mode
    pub fn offset(page_size: usize, page_index: usize) -> Self {
        Self {
            page_size,
            page_index: Some(page_index),
            cursor: None,
        }
    }

    /// Continue from `cursor` in cursor-mode
    pub fn cursor(page_size: usize, cursor: impl Into<String>) -> Self {
        Self {
            page_size,
            page_index: None,
            cursor: Some(cursor.into()),
        }
    }

    /// Infer the active pagination mode.
    ///
    /// An empty-string cursor does not select cursor-mode.
    pub fn mode(&self) -> PaginationMode<'_> {
        match self.cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => PaginationMode::Cursor(cursor),
            _ => PaginationMode::Offset {
                page_index: self.page_index.unwrap_or(0),
            },
        }
    }

    /// Returns true if the request names neither a page nor a cursor. Such a
    /// request reads the first page and may begin either kind of sequence.
    pub fn is_unpositioned(&self) -> bool {
        self.page_index.is_none() && !self.is_cursor_mode()
    }

    /// Returns true if this request is in cursor-mode
    pub fn is_cursor_mode(&self) -> bool {
        matches!(self.mode(), PaginationMode::Cursor(_))
    }
}
