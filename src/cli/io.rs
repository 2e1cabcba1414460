//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin (may span lines)
//! - Output: one JSON document per line on stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::Value;

use super::errors::CliResult;

/// Read a JSON document from stdin. Blank input is `None`.
pub fn read_input() -> CliResult<Option<Value>> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_input(&input)
}

/// Parse raw input text. Blank input is `None`.
pub fn parse_input(input: &str) -> CliResult<Option<Value>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(input)?))
}

/// Write a value as one JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_json_to(&mut stdout, value)
}

/// Write a value as one JSON line to `writer`
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
