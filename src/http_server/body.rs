//! Request body and fallback helpers shared by the route modules

use axum::body::Bytes;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};

/// Parse a raw request body as JSON. The `Content-Type` header is not checked.
pub(crate) fn parse_json(body: &Bytes) -> ApiResult<Value> {
    if body.is_empty() {
        return Err(ApiError::InvalidBody("empty body".to_string()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Answer for unknown paths and unsupported methods on known paths
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}
