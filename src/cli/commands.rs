//! CLI command implementations

use std::path::Path;

use tracing::info;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_stdout;
use crate::http_server::{ApiState, HttpServer, ServerConfig, StorageBackendKind};
use crate::records::Budget;
use crate::summary::BudgetSummary;

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(config.as_deref(), port).await,
        Command::Report { year, config } => {
            let config = ServerConfig::load(config.as_deref())?;
            let summary = report(&config, year)?;
            write_stdout(&summary)
        }
    }
}

/// Load configuration, open the stores and serve HTTP until stopped
pub async fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = ServerConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }
    info!(
        addr = %config.socket_addr(),
        backend = ?config.storage.backend,
        "starting expense API"
    );

    let server = HttpServer::from_config(config)?;
    server.start().await?;
    Ok(())
}

/// Summarize spending for the budgets of `year` from persisted tables
pub fn report(config: &ServerConfig, year: i32) -> CliResult<BudgetSummary> {
    if config.storage.backend != StorageBackendKind::File {
        return Err(CliError::Usage(
            "report reads persisted tables; set storage.backend to \"file\" or XPENSES_DATA_DIR"
                .to_string(),
        ));
    }

    let state = ApiState::from_config(config)?;
    let budgets = state
        .budgets
        .query(Budget::YEAR_FIELD, &serde_json::Value::from(year))?;
    let expenses = state.expenses.scan()?;

    Ok(BudgetSummary::build(budgets, &expenses))
}
