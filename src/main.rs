//! xpenses CLI entry point
//!
//! Installs logging, parses arguments, runs the selected command and exits
//! non-zero on failure.

use xpenses::{cli, observability};

#[tokio::main]
async fn main() {
    observability::init_tracing();

    if let Err(e) = cli::run().await {
        tracing::error!(error = %e, "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
