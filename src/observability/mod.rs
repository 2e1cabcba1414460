//! Observability
//!
//! - Structured logging (JSON lines)
//! - Query metrics (atomic counters)
//! - Typed lifecycle events
//!
//! Observability is read-only: nothing here changes query results, and a
//! failure to write a log line is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use querykit::observability::{log_event_with_fields, Event, QueryMetrics};
//!
//! log_event_with_fields(Event::QueryExecuted, &[("items", "10")]);
//!
//! let metrics = QueryMetrics::new();
//! metrics.record_query(10);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, QueryMetrics};

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
