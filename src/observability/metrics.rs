//! Query metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for query services
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Queries that returned a page
    queries_executed: AtomicU64,
    /// Queries or lookups that failed during execution
    queries_failed: AtomicU64,
    /// Calls to operations a source does not implement
    unsupported_calls: AtomicU64,
    /// Items returned across all pages
    items_returned: AtomicU64,
    /// `get_by_id` calls
    lookups: AtomicU64,
    /// `get_count` calls
    counts: AtomicU64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub unsupported_calls: u64,
    pub items_returned: u64,
    pub lookups: u64,
    pub counts: u64,
}

impl QueryMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful query page
    pub fn record_query(&self, items: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.items_returned.fetch_add(items as u64, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unsupported(&self) {
        self.unsupported_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_counts(&self) {
        self.counts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            unsupported_calls: self.unsupported_calls.load(Ordering::Relaxed),
            items_returned: self.items_returned.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            counts: self.counts.load(Ordering::Relaxed),
        }
    }
}
