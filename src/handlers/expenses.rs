// src/handlers/expenses.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, scope::ScopeContext},
    models::expense::{CreateExpensePayload, Expense},
};

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Expenses",
    params(("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")),
    responses((status = 200, description = "Despesas (mais recentes primeiro)", body = Vec<Expense>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let expenses = app_state
        .expense_service
        .list(&ctx.scope, mutuelle_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(expenses))
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = CreateExpensePayload,
    params(("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")),
    responses(
        (status = 201, description = "Despesa lançada (debita o saldo)", body = Expense),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state
        .expense_service
        .create(&ctx.scope, mutuelle_id, ctx.user_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

// DELETE /api/expenses/{id}
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Expenses",
    params(
        ("id" = Uuid, Path, description = "ID da despesa"),
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses(
        (status = 204, description = "Despesa removida (valor volta ao saldo)"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .expense_service
        .delete(&ctx.scope, mutuelle_id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
