//! Expense HTTP Routes
//!
//! - `GET /expenses[?budgetItemId=..]` - list, optionally for one budget item
//! - `POST /expenses` - create
//! - `DELETE /expenses/:id` - delete (idempotent)

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::body::{not_found, parse_json};
use super::errors::ApiResult;
use super::extract::{ApiPath, ApiQuery};
use super::state::ApiState;
use crate::records::{Expense, ExpenseDraft, ExpenseView};

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    #[serde(rename = "budgetItemId")]
    pub budget_item_id: Option<String>,
}

/// Create expense routes
pub fn expense_routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/expenses",
            get(list_expenses_handler)
                .post(create_expense_handler)
                .fallback(not_found),
        )
        .route(
            "/expenses/:id",
            delete(delete_expense_handler).fallback(not_found),
        )
}

async fn list_expenses_handler(
    State(state): State<ApiState>,
    ApiQuery(filter): ApiQuery<ExpenseFilter>,
) -> ApiResult<Json<Vec<ExpenseView>>> {
    let expenses = state
        .with_expenses(move |store| match filter.budget_item_id {
            Some(budget_item_id) => {
                store.query(Expense::BUDGET_ITEM_FIELD, &Value::String(budget_item_id))
            }
            None => store.scan(),
        })
        .await?;
    Ok(Json(expenses.into_iter().map(ExpenseView::from).collect()))
}

async fn create_expense_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ExpenseView>)> {
    let draft = ExpenseDraft::from_json(&parse_json(&body)?)?;
    let expense = state.with_expenses(move |store| store.insert(draft)).await?;
    tracing::info!(id = %expense.id, budget_item_id = %expense.budget_item_id, "expense created");
    Ok((StatusCode::CREATED, Json(expense.into())))
}

async fn delete_expense_handler(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    state.with_expenses(move |store| store.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
