// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, scope::ScopeContext},
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(("x-mutuelle-id" = Option<uuid::Uuid>, Header, description = "ID da mutuelle")),
    responses(
        (status = 200, description = "Indicadores da mutuelle", body = DashboardSummary),
        (status = 404, description = "Mutuelle fora do escopo")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .dashboard_service
        .get_summary(&ctx.scope, mutuelle_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}
