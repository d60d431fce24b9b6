// src/handlers/mutuelles.rs

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
    models::mutuelle::{Mutuelle, MutuellePayload},
};

// GET /api/mutuelles
#[utoipa::path(
    get,
    path = "/api/mutuelles",
    tag = "Mutuelles",
    responses((status = 200, description = "Mutuelles visíveis para o usuário", body = Vec<Mutuelle>)),
    security(("api_jwt" = []))
)]
pub async fn list_mutuelles(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelles = app_state
        .mutuelle_service
        .list(&ctx.scope)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(mutuelles))
}

// POST /api/mutuelles
#[utoipa::path(
    post,
    path = "/api/mutuelles",
    tag = "Mutuelles",
    request_body = MutuellePayload,
    responses(
        (status = 201, description = "Mutuelle criada", body = Mutuelle),
        (status = 403, description = "Apenas super admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_mutuelle(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Json(payload): Json<MutuellePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle = app_state
        .mutuelle_service
        .create(&ctx.scope, ctx.user_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(mutuelle)))
}

// PUT /api/mutuelles/{id}
#[utoipa::path(
    put,
    path = "/api/mutuelles/{id}",
    tag = "Mutuelles",
    request_body = MutuellePayload,
    params(("id" = Uuid, Path, description = "ID da mutuelle")),
    responses(
        (status = 200, description = "Mutuelle atualizada", body = Mutuelle),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_mutuelle(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<MutuellePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle = app_state
        .mutuelle_service
        .update(&ctx.scope, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(mutuelle))
}
