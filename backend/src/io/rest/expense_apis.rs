//! Expense endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shared::{CreateExpenseRequest, Expense, ExpenseListResponse, UpdateExpenseRequest};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::io::rest::AppState;

/// GET /api/expenses
pub async fn list_expenses(State(state): State<AppState>) -> ApiResult<Json<ExpenseListResponse>> {
    let expenses = state
        .expenses
        .list()
        .await?
        .into_iter()
        .map(ExpenseMapper::to_dto)
        .collect();
    Ok(Json(ExpenseListResponse { expenses }))
}

/// POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    info!("POST /api/expenses - category: {}", request.category);
    let expense = state.expenses.create(request).await?;
    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_dto(expense))))
}

/// GET /api/expenses/:id
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Expense>> {
    let expense = state.expenses.get(id).await?;
    Ok(Json(ExpenseMapper::to_dto(expense)))
}

/// PUT /api/expenses/:id
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> ApiResult<Json<Expense>> {
    info!("PUT /api/expenses/{id}");
    let expense = state.expenses.update(id, request).await?;
    Ok(Json(ExpenseMapper::to_dto(expense)))
}

/// DELETE /api/expenses/:id
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/expenses/{id}");
    state.expenses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
