//! JSON output for CLI commands

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<T: Serialize, W: Write>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `value` to stdout
pub fn write_stdout<T: Serialize>(value: &T) -> CliResult<()> {
    write_json(&mut io::stdout().lock(), value)
}
