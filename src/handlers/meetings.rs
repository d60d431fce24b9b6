// src/handlers/meetings.rs

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
    models::meeting::{
        CreateMeetingPayload, MarkAttendancePayload, Meeting, MeetingAttendance, UpdateMeetingPayload,
    },
};

// =============================================================================
//  REUNIÕES
// =============================================================================

// GET /api/meetings
#[utoipa::path(
    get,
    path = "/api/meetings",
    tag = "Meetings",
    params(("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")),
    responses((status = 200, description = "Reuniões", body = Vec<Meeting>)),
    security(("api_jwt" = []))
)]
pub async fn list_meetings(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let meetings = app_state
        .meeting_service
        .list(&ctx.scope, mutuelle_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(meetings))
}

// POST /api/meetings
#[utoipa::path(
    post,
    path = "/api/meetings",
    tag = "Meetings",
    request_body = CreateMeetingPayload,
    params(("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")),
    responses(
        (status = 201, description = "Reunião agendada", body = Meeting),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_meeting(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Json(payload): Json<CreateMeetingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let meeting = app_state
        .meeting_service
        .create(&ctx.scope, mutuelle_id, ctx.user_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(meeting)))
}

// PUT /api/meetings/{id}
#[utoipa::path(
    put,
    path = "/api/meetings/{id}",
    tag = "Meetings",
    request_body = UpdateMeetingPayload,
    params(
        ("id" = Uuid, Path, description = "ID da reunião"),
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses(
        (status = 200, description = "Reunião atualizada", body = Meeting),
        (status = 404, description = "Reunião não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_meeting(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMeetingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let meeting = app_state
        .meeting_service
        .update(&ctx.scope, mutuelle_id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(meeting))
}

// =============================================================================
//  PRESENÇAS
// =============================================================================

// GET /api/meetings/{id}/attendance
#[utoipa::path(
    get,
    path = "/api/meetings/{id}/attendance",
    tag = "Meetings",
    params(
        ("id" = Uuid, Path, description = "ID da reunião"),
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses((status = 200, description = "Presenças marcadas", body = Vec<MeetingAttendance>)),
    security(("api_jwt" = []))
)]
pub async fn list_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rows = app_state
        .meeting_service
        .list_attendance(&ctx.scope, mutuelle_id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}

// PUT /api/meetings/{id}/attendance
#[utoipa::path(
    put,
    path = "/api/meetings/{id}/attendance",
    tag = "Meetings",
    request_body = MarkAttendancePayload,
    params(
        ("id" = Uuid, Path, description = "ID da reunião"),
        ("x-mutuelle-id" = Option<Uuid>, Header, description = "ID da mutuelle")
    ),
    responses(
        (status = 200, description = "Presença marcada", body = MeetingAttendance),
        (status = 404, description = "Reunião ou membro fora da mutuelle")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkAttendancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mutuelle_id = ctx
        .target()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let row = app_state
        .meeting_service
        .mark_attendance(&ctx.scope, mutuelle_id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(row))
}
