//! Budget HTTP Routes
//!
//! `/budgets/year/:year` is registered alongside `/budgets/:id`; the static
//! `year` segment wins, so a year listing is never read as an id lookup.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::body::{not_found, parse_json};
use super::errors::{ApiError, ApiResult};
use super::extract::ApiPath;
use super::state::ApiState;
use crate::records::{parse_year, Budget, BudgetDraft, BudgetView};

/// Create budget routes
pub fn budget_routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/budgets",
            get(list_budgets_handler)
                .post(create_budget_handler)
                .fallback(not_found),
        )
        .route(
            "/budgets/year/:year",
            get(list_budgets_by_year_handler).fallback(not_found),
        )
        .route(
            "/budgets/:id",
            get(get_budget_handler)
                .put(update_budget_handler)
                .delete(delete_budget_handler)
                .fallback(not_found),
        )
}

fn views(budgets: Vec<Budget>) -> Json<Vec<BudgetView>> {
    Json(budgets.into_iter().map(BudgetView::from).collect())
}

async fn list_budgets_handler(
    State(state): State<ApiState>,
) -> ApiResult<Json<Vec<BudgetView>>> {
    let budgets = state.with_budgets(|store| store.scan()).await?;
    Ok(views(budgets))
}

async fn list_budgets_by_year_handler(
    State(state): State<ApiState>,
    ApiPath(year): ApiPath<String>,
) -> ApiResult<Json<Vec<BudgetView>>> {
    let year = parse_year(&year)?;
    let budgets = state
        .with_budgets(move |store| store.query(Budget::YEAR_FIELD, &Value::from(year)))
        .await?;
    Ok(views(budgets))
}

async fn get_budget_handler(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<BudgetView>> {
    let lookup = id.clone();
    state
        .with_budgets(move |store| store.get(&lookup))
        .await?
        .map(|budget| Json(budget.into()))
        .ok_or(ApiError::BudgetNotFound(id))
}

async fn create_budget_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<BudgetView>)> {
    let draft = BudgetDraft::from_json(&parse_json(&body)?)?;
    let budget = state.with_budgets(move |store| store.insert(draft)).await?;
    tracing::info!(id = %budget.id, year = budget.year, "budget created");
    Ok((StatusCode::CREATED, Json(budget.into())))
}

async fn update_budget_handler(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<String>,
    body: Bytes,
) -> ApiResult<Json<BudgetView>> {
    let draft = BudgetDraft::from_json(&parse_json(&body)?)?;
    let budget = state
        .with_budgets(move |store| store.update(&id, draft))
        .await?;
    tracing::info!(id = %budget.id, "budget updated");
    Ok(Json(budget.into()))
}

async fn delete_budget_handler(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    state.with_budgets(move |store| store.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
