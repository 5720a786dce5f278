use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    state::AppState,
};

use super::dto::{ExpenseCreated, ExpenseDeleted, ExpenseItem, ExpenseRequest, ExpenseUpdated};
use super::repo_types::Expense;
use super::services;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/expenses", get(list_expenses))
        .route("/api/expenses/:id", get(get_expense))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/expenses", post(create_expense))
        .route("/api/expenses/:id", put(update_expense).delete(delete_expense))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<ExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ApiError> {
    let input = services::validate(payload)?;
    let expense = Expense::create(&state.db, principal.user_id, &input).await?;

    info!(expense_id = %expense.id, "expense created");
    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            message: "Expense added successfully!".into(),
            expense_id: expense.id,
            redirect_url: "/expenses?message=Expense added successfully!".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<ExpenseItem>>, ApiError> {
    let expenses = Expense::list_by_user(&state.db, principal.user_id).await?;
    Ok(Json(expenses.into_iter().map(ExpenseItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_expense(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseItem>, ApiError> {
    let expense = Expense::find(&state.db, principal.user_id, id)
        .await?
        .ok_or(ApiError::NotFoundOrUnauthorized)?;
    Ok(Json(ExpenseItem::from(expense)))
}

#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseRequest>,
) -> Result<Json<ExpenseUpdated>, ApiError> {
    let input = services::validate(payload)?;
    let rows = Expense::update(&state.db, principal.user_id, id, &input).await?;
    if rows == 0 {
        return Err(ApiError::NotFoundOrUnauthorized);
    }

    info!(expense_id = %id, "expense updated");
    Ok(Json(ExpenseUpdated {
        message: "Expense updated successfully!".into(),
        redirect_url: "/expenses?message=Expense updated successfully!".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseDeleted>, ApiError> {
    let rows = Expense::delete(&state.db, principal.user_id, id).await?;
    if rows == 0 {
        return Err(ApiError::NotFoundOrUnauthorized);
    }

    info!(expense_id = %id, "expense deleted");
    Ok(Json(ExpenseDeleted {
        message: "Expense deleted successfully!".into(),
    }))
}
