//! CLI command implementations
//!
//! Each data command builds one in-memory collection, binds it to a
//! collection service, runs a single operation and prints the outcome as one
//! JSON line. Query-level failures (bad spec, unsupported operator) are part
//! of the outcome; only setup failures are CLI errors.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::QueryConfig;
use crate::datasource::InMemoryDataSource;
use crate::mock::generate_user_documents;
use crate::observability::Logger;
use crate::query::{
    validate_spec, FilterCondition, PaginationSpec, QueryResult, QuerySpec, ValidationError,
};
use crate::service::{CollectionService, Outcome};

use super::args::{Command, SourceArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime_error(e.to_string()))?;

    runtime.block_on(async {
        match cmd {
            Command::Query { source } => query(&source).await,
            Command::Count { source } => count(&source).await,
            Command::Get { source, id } => get(&source, &id).await,
            Command::Mock { count } => mock(count),
        }
    })
}

/// Execute a query spec read from stdin
pub async fn query(args: &SourceArgs) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    let service = build_service(args, &config)?;

    let raw = read_input()?.ok_or_else(|| CliError::io_error("Empty input"))?;
    let outcome = execute_query(&service, &config, &raw).await;

    write_json(&outcome)
}

/// Count items matching a filter array read from stdin. Blank input counts
/// every item.
pub async fn count(args: &SourceArgs) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    let service = build_service(args, &config)?;

    let raw = read_input()?.unwrap_or_else(|| Value::Array(Vec::new()));
    let outcome = execute_count(&service, &raw).await;

    write_json(&outcome)
}

/// Look up one item by id
pub async fn get(args: &SourceArgs, id: &str) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    let service = build_service(args, &config)?;

    let outcome: Outcome<Option<Value>> = service.get_by_id(id).await.into();

    write_json(&outcome)
}

/// Print `count` generated mock users as a JSON array
pub fn mock(count: usize) -> CliResult<()> {
    let users = generate_user_documents(count)?;
    write_json(&users)
}

/// Validate `raw` under `config` and run it
pub async fn execute_query(
    service: &CollectionService<Value>,
    config: &QueryConfig,
    raw: &Value,
) -> Outcome<QueryResult<Value>> {
    match config.parse_spec(raw) {
        Ok(spec) => service.query(&spec).await.into(),
        Err(err) => err.into(),
    }
}

/// Validate a raw filter array and count matches
pub async fn execute_count(service: &CollectionService<Value>, raw: &Value) -> Outcome<usize> {
    let filters: Vec<FilterCondition> = match serde_json::from_value(raw.clone()) {
        Ok(filters) => filters,
        Err(e) => return ValidationError::Malformed(e.to_string()).into(),
    };

    let spec = QuerySpec::new(PaginationSpec::default()).with_filters(filters);
    if let Err(err) = validate_spec(&spec) {
        return err.into();
    }

    service.get_count(&spec.filters).await.into()
}

/// Load the config file if one was given, defaults otherwise, and apply its
/// log level
fn load_config(path: Option<&Path>) -> CliResult<QueryConfig> {
    let config = match path {
        Some(path) => QueryConfig::load(path)?,
        None => QueryConfig::default(),
    };

    Logger::set_min_severity(config.min_severity()?);
    Ok(config)
}

/// Bind the requested collection to a service
fn build_service(args: &SourceArgs, config: &QueryConfig) -> CliResult<CollectionService<Value>> {
    let (entity, items) = match &args.data {
        Some(path) => (entity_name(path), load_documents(path)?),
        None => ("users".to_string(), generate_user_documents(args.mock_count)?),
    };

    let source = InMemoryDataSource::new(entity.clone(), items).with_executor(config.executor());
    Ok(CollectionService::new(entity, std::sync::Arc::new(source)))
}

/// Read a JSON array of objects from a data file
pub fn load_documents(path: &Path) -> CliResult<Vec<Value>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str(&content)? {
        Value::Array(items) => {
            if let Some(position) = items.iter().position(|item| !item.is_object()) {
                return Err(CliError::data_error(format!(
                    "{}: element {} is not an object",
                    path.display(),
                    position
                )));
            }
            Ok(items)
        }
        _ => Err(CliError::data_error(format!(
            "{}: expected a JSON array of objects",
            path.display()
        ))),
    }
}

fn entity_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "items".to_string())
}
