//! CLI module for querykit
//!
//! Provides command-line interface for:
//! - query: run a query spec from stdin against a collection
//! - count: count items matching a filter array from stdin
//! - get: look up one item by id
//! - mock: print a generated mock user collection

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SourceArgs};
pub use commands::{
    count, execute_count, execute_query, get, load_documents, mock, query, run, run_command,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_input, read_input, write_json, write_json_to};
