//! CLI argument definitions using clap
//!
//! Commands:
//! - xpenses serve [--config <path>] [--port <port>]
//! - xpenses report --year <year> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xpenses - expense and budget tracking API
#[derive(Parser, Debug)]
#[command(name = "xpenses")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and environment
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print spending against each budget of a year as JSON
    Report {
        /// Budget year to summarize
        #[arg(long)]
        year: i32,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
