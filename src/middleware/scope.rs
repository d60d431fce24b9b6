// src/middleware/scope.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::roles::RoleScope,
};

// Cabeçalho HTTP com a mutuelle escolhida pelo cliente
pub const MUTUELLE_ID_HEADER: &str = "x-mutuelle-id";

/// Escopo resolvido para a requisição atual.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub user_id: Uuid,
    pub scope: RoleScope,
    pub requested: Option<Uuid>,
}

impl ScopeContext {
    /// A mutuelle sobre a qual a requisição opera.
    /// Uma mutuelle pedida fora do escopo é devolvida assim mesmo: a checagem de acesso decide.
    pub fn target(&self) -> Result<Uuid, AppError> {
        if self.scope == RoleScope::Unauthorized {
            return Err(AppError::NoRole);
        }
        if let Some(requested) = self.requested {
            return Ok(requested);
        }
        match &self.scope {
            RoleScope::Scoped { mutuelle_id, .. } => Ok(*mutuelle_id),
            RoleScope::SuperAdmin => Err(AppError::MutuelleSelectionRequired(Vec::new())),
            RoleScope::Ambiguous { mutuelle_ids } => {
                Err(AppError::MutuelleSelectionRequired(mutuelle_ids.clone()))
            }
            RoleScope::Unauthorized => Err(AppError::NoRole),
        }
    }
}

pub fn requested_mutuelle(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    match headers.get(MUTUELLE_ID_HEADER) {
        None => Ok(None),
        Some(value) => {
            let raw = value.to_str().map_err(|_| AppError::InvalidMutuelleHeader)?;
            Uuid::parse_str(raw.trim())
                .map(Some)
                .map_err(|_| AppError::InvalidMutuelleHeader)
        }
    }
}

// Roda depois do auth_guard: resolve os papéis a cada requisição (sem cache)
pub async fn scope_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let user_id = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.0.id)
        .ok_or(AppError::InvalidToken)
        .map_err(to_api)?;

    let requested = requested_mutuelle(request.headers()).map_err(to_api)?;
    let scope = app_state.role_service.resolve(user_id, requested).await;

    request.extensions_mut().insert(ScopeContext { user_id, scope, requested });
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for ScopeContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ScopeContext>().cloned().ok_or_else(|| {
            AppError::NoRole.to_api_error(&Locale::from_headers(&parts.headers), &Default::default())
        })
    }
}
