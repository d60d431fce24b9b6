// src/handlers/contribution_configs.rs

use axum::{
    extract::{Path, Query, State},
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
    models::contribution::{ConfigFilter, ContributionConfig, CreateConfigPayload, UpdateConfigPayload},
};

// GET /api/contribution-configs
#[utoipa::path(
    get,
    path = "/api/contribution-configs",
    tag = "Contributions",
    params(
        ConfigFilter,
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses((status = 200, description = "Modelos de cotisation", body = Vec<ContributionConfig>)),
    security(("api_jwt" = []))
)]
pub async fn list_configs(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Query(filter): Query<ConfigFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let configs = app_state
        .config_service
        .list(&ctx.scope, mutuelle_id, filter.active)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(configs))
}

// POST /api/contribution-configs
#[utoipa::path(
    post,
    path = "/api/contribution-configs",
    tag = "Contributions",
    request_body = CreateConfigPayload,
    params(("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")),
    responses(
        (status = 201, description = "Modelo criado", body = ContributionConfig),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_config(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Json(payload): Json<CreateConfigPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let config = app_state
        .config_service
        .create(&ctx.scope, mutuelle_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(config)))
}

// PUT /api/contribution-configs/{id}
#[utoipa::path(
    put,
    path = "/api/contribution-configs/{id}",
    tag = "Contributions",
    request_body = UpdateConfigPayload,
    params(
        ("id" = Uuid, Path, description = "ID do modelo"),
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses(
        (status = 200, description = "Modelo atualizado", body = ContributionConfig),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_config(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConfigPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let config = app_state
        .config_service
        .update(&ctx.scope, mutuelle_id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(config))
}
