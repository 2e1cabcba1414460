//! Observable events
//!
//! Events are explicit and typed; each maps to one log line.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// A data source was bound to a collection service
    SourceBound,
    /// Query returned a page
    QueryExecuted,
    /// Query or lookup failed during execution
    QueryFailed,
    /// Caller invoked an operation the source does not implement
    OperationUnsupported,
    /// An unknown filter operator was let through
    UnknownOperatorPassed,
    /// Filters were split between a native store and post-fetch
    FilterSplit,
}

impl Event {
    /// Returns the event name as it appears in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceBound => "SOURCE_BOUND",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::OperationUnsupported => "OPERATION_UNSUPPORTED",
            Event::UnknownOperatorPassed => "UNKNOWN_OPERATOR_PASSED",
            Event::FilterSplit => "FILTER_SPLIT",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryExecuted | Event::FilterSplit => Severity::Trace,
            Event::ConfigLoaded | Event::SourceBound => Severity::Info,
            Event::OperationUnsupported | Event::UnknownOperatorPassed => Severity::Warn,
            Event::QueryFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
