// src/handlers/contributions.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, scope::ScopeContext},
    models::contribution::{
        ContributionSummary, InitiateContributionPayload, InitiateQuery, InitiatedContribution,
    },
};

// GET /api/contributions
#[utoipa::path(
    get,
    path = "/api/contributions",
    tag = "Contributions",
    params(("x-mutuelle-id" = Option<uuid::Uuid>, Header, description = "ID da mutuelle")),
    responses((status = 200, description = "Histórico de cotisations", body = Vec<ContributionSummary>)),
    security(("api_jwt" = []))
)]
pub async fn list_contributions(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let contributions = app_state
        .contribution_service
        .list(&ctx.scope, mutuelle_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(contributions))
}

// POST /api/contributions/initiate
#[utoipa::path(
    post,
    path = "/api/contributions/initiate",
    tag = "Contributions",
    request_body = InitiateContributionPayload,
    params(
        InitiateQuery,
        ("x-mutuelle-id" = Option<uuid::Uuid>, Header, description = "ID da mutuelle")
    ),
    responses(
        (status = 201, description = "Cotisation pendente e sessão de pagamento", body = InitiatedContribution),
        (status = 303, description = "Redireciona para a página de pagamento (redirect=true)"),
        (status = 400, description = "Dados inválidos ou membro sem e-mail"),
        (status = 502, description = "Paystack recusou a sessão")
    ),
    security(("api_jwt" = []))
)]
pub async fn initiate_contribution(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Query(query): Query<InitiateQuery>,
    Json(payload): Json<InitiateContributionPayload>,
) -> Result<Response, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let initiated = app_state
        .contribution_service
        .initiate(&ctx.scope, mutuelle_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // O navegador segue direto para o checkout
    if query.redirect {
        let location = initiated.authorization_url.clone();
        return Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response());
    }

    Ok((StatusCode::CREATED, Json(initiated)).into_response())
}
