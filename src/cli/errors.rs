//! CLI-specific error types
//!
//! A CLI error ends the process with a non-zero exit. Query failures are not
//! CLI errors; they are reported in the JSON outcome on stdout.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout, data file)
    IoError,
    /// Data file or input is not in the expected shape
    DataError,
    /// Async runtime could not start
    RuntimeError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "QUERYKIT_CLI_CONFIG_ERROR",
            Self::IoError => "QUERYKIT_CLI_IO_ERROR",
            Self::DataError => "QUERYKIT_CLI_DATA_ERROR",
            Self::RuntimeError => "QUERYKIT_CLI_RUNTIME_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn data_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DataError, msg)
    }

    pub fn runtime_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RuntimeError, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::data_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::data_error("expected a JSON array");
        assert_eq!(err.to_string(), "QUERYKIT_CLI_DATA_ERROR: expected a JSON array");
        assert_eq!(err.code(), CliErrorCode::DataError);
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = crate::config::QueryConfig::from_json("{\"max_page_size\": 0}")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert!(err.message().contains("max_page_size"));
    }
}
