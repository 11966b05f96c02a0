//! # HTTP Server
//!
//! Combines the health, expense and budget routers under `/api`, wrapped in
//! CORS, default response headers and request tracing.

use std::net::SocketAddr;

use axum::extract::Request;
use axum::http::header::{ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::body::not_found;
use super::budget_routes::budget_routes;
use super::config::ServerConfig;
use super::errors::ApiError;
use super::expense_routes::expense_routes;
use super::health_routes::health_routes;
use super::state::ApiState;
use crate::store::StoreResult;

/// Methods advertised to browsers
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// HTTP server for the expense API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Open the stores named by `config` and build the router
    pub fn from_config(config: ServerConfig) -> StoreResult<Self> {
        let state = ApiState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Build a server around already-constructed stores
    pub fn with_state(config: ServerConfig, state: ApiState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> std::io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "expense API listening");
        info!("health check: http://{}/api/health", addr);

        axum::serve(listener, self.router).await
    }
}

/// Build the full application router
pub fn build_router(config: &ServerConfig, state: ApiState) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .merge(expense_routes())
        .merge(budget_routes());

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .layer(from_fn(reject_head))
        .layer(cors_layer(config))
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
}

/// axum answers HEAD on every GET route; this API only serves the listed methods.
async fn reject_head(request: Request, next: Next) -> Response {
    if request.method() == Method::HEAD {
        return ApiError::NotFound.into_response();
    }
    next.run(request).await
}

/// CORS for every path. OPTIONS requests are answered here with 200 and an empty body.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    if config.cors_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
