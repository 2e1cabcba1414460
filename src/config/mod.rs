//! Runtime configuration
//!
//! Loaded from a JSON file. Every key is optional; a missing file is an
//! error only when a path was given explicitly.
//!
//! ```json
//! {
//!   "default_page_size": 20,
//!   "max_page_size": 100,
//!   "unknown_operator": "fail_open",
//!   "strict_pushdown": false,
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::engine::{QueryExecutor, UnknownOperatorPolicy};
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::query::{
    parse_query_spec, QuerySpec, ValidationError, ValidationResult, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when a request omits one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest page size a request may ask for (at most 100)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Handling of filter operators outside the known set
    #[serde(default)]
    pub unknown_operator: UnknownOperatorPolicy,

    /// Reject filters a native store cannot evaluate instead of post-fetching
    #[serde(default)]
    pub strict_pushdown: bool,

    /// Minimum log severity: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            unknown_operator: UnknownOperatorPolicy::default(),
            strict_pushdown: false,
            log_level: default_log_level(),
        }
    }
}

impl QueryConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        let shown = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("log_level", config.log_level.as_str()), ("path", shown.as_str())],
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: QueryConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.max_page_size) {
            return Err(ConfigError::Invalid {
                key: "max_page_size",
                reason: format!(
                    "{} is outside {}..={}",
                    self.max_page_size, MIN_PAGE_SIZE, MAX_PAGE_SIZE
                ),
            });
        }

        if !(MIN_PAGE_SIZE..=self.max_page_size).contains(&self.default_page_size) {
            return Err(ConfigError::Invalid {
                key: "default_page_size",
                reason: format!(
                    "{} is outside {}..={}",
                    self.default_page_size, MIN_PAGE_SIZE, self.max_page_size
                ),
            });
        }

        self.min_severity()?;
        Ok(())
    }

    /// Minimum severity named by `log_level`
    pub fn min_severity(&self) -> ConfigResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|reason| ConfigError::Invalid {
                key: "log_level",
                reason,
            })
    }

    /// Parse a raw spec under the configured page-size limits. A request
    /// without `pagination.pageSize` gets `default_page_size`.
    pub fn parse_spec(&self, raw: &Value) -> ValidationResult<QuerySpec> {
        let mut raw = raw.clone();
        if let Some(pagination) = raw.get_mut("pagination").and_then(Value::as_object_mut) {
            pagination
                .entry("pageSize")
                .or_insert_with(|| Value::from(self.default_page_size));
        }

        let spec = parse_query_spec(&raw)?;

        let size = spec.pagination.page_size;
        if size > self.max_page_size {
            return Err(ValidationError::PageSizeOutOfRange {
                size,
                min: MIN_PAGE_SIZE,
                max: self.max_page_size,
            });
        }

        Ok(spec)
    }

    /// Executor honoring the configured unknown-operator policy
    pub fn executor(&self) -> QueryExecutor {
        QueryExecutor::new(self.unknown_operator)
    }
}
