// src/handlers/roles.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, scope::ScopeContext},
    models::roles::{AppRole, GrantRolePayload, UserRole},
    services::role_service::RoleService,
};

// POST /api/roles
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Roles",
    request_body = GrantRolePayload,
    responses(
        (status = 201, description = "Papel atribuído", body = UserRole),
        (status = 400, description = "Papel incompatível com o escopo"),
        (status = 403, description = "Sem permissão"),
        (status = 404, description = "Perfil não encontrado")
    ),
    params(("x-mutuelle-id" = Option<uuid::Uuid>, Header, description = "Mutuelle alvo")),
    security(("api_jwt" = []))
)]
pub async fn grant_role(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: ScopeContext,
    Json(payload): Json<GrantRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // Sem mutuelle explícita, papéis escopados vão para a mutuelle do contexto
    let mutuelle_id = match (payload.mutuelle_id, payload.role) {
        (Some(id), _) => Some(id),
        (None, AppRole::SuperAdmin) => None,
        (None, _) => Some(ctx.target().map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?),
    };

    // Permissão antes do e-mail: quem não pode conceder não descobre quem está cadastrado
    RoleService::authorize_grant(&ctx.scope, payload.role, mutuelle_id)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let profile = app_state
        .auth_service
        .find_by_email(&payload.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let granted = app_state
        .role_service
        .grant_role(&ctx.scope, profile.id, payload.role, mutuelle_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(granted)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::{
        models::roles::{RoleScope, ScopedRole},
        test_support::{test_state, InMemoryContributionStore, InMemoryRoleStore, StubGateway},
    };

    fn context(role: ScopedRole, mutuelle_id: Uuid) -> ScopeContext {
        ScopeContext {
            user_id: Uuid::new_v4(),
            scope: RoleScope::Scoped { role, mutuelle_id, member_id: None },
            requested: None,
        }
    }

    // O banco (pool preguiçoso) nunca é tocado: a recusa vem antes da busca por e-mail
    #[tokio::test]
    async fn member_cannot_discover_registered_emails() {
        let state = test_state(
            Arc::new(InMemoryRoleStore::default()),
            Arc::new(InMemoryContributionStore::default()),
            Arc::new(StubGateway::default()),
        );
        let payload = GrantRolePayload {
            email: "nobody@example.com".to_string(),
            role: AppRole::Treasurer,
            mutuelle_id: None,
        };

        let result = grant_role(
            State(state),
            Locale("en".to_string()),
            context(ScopedRole::Member, Uuid::new_v4()),
            Json(payload),
        )
        .await;

        let Err(err) = result else {
            panic!("expected a refusal");
        };
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
