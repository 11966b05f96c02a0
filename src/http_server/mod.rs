//! # HTTP Server Module
//!
//! JSON API over the expense and budget stores.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Health check
//! - `/api/expenses` - list, create, delete expenses
//! - `/api/budgets` - list, list by year, get, create, replace, delete budgets
//!
//! Any other method or path answers 404 `{"error": "Not found"}`, including
//! HEAD on routes that only serve GET.

mod body;
pub mod budget_routes;
pub mod config;
pub mod errors;
pub mod expense_routes;
mod extract;
pub mod health_routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig, StorageBackendKind, StorageConfig, TableNames};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, HttpServer};
pub use state::ApiState;
