//! CLI module for xpenses
//!
//! Provides command-line interface for:
//! - serve: run the HTTP API
//! - report: print a per-budget spending summary

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{report, run_command, serve};
pub use errors::{CliError, CliResult};
pub use io::{write_json, write_stdout};

/// Parse arguments and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command).await
}
