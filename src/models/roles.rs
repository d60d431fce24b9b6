// src/models/roles.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enum (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "app_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    SuperAdmin,
    Admin,
    Treasurer,
    Member,
}

impl AppRole {
    /// super_admin é global (sem mutuelle); os outros exigem uma mutuelle.
    pub fn accepts_scope(self, mutuelle_id: Option<Uuid>) -> bool {
        match self {
            AppRole::SuperAdmin => mutuelle_id.is_none(),
            AppRole::Admin | AppRole::Treasurer | AppRole::Member => mutuelle_id.is_some(),
        }
    }
}

/// Papel válido dentro de uma mutuelle. Não existe "super admin escopado".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScopedRole {
    Member,
    Treasurer,
    Admin,
}

impl ScopedRole {
    pub fn from_app_role(role: AppRole) -> Option<Self> {
        match role {
            AppRole::Admin => Some(ScopedRole::Admin),
            AppRole::Treasurer => Some(ScopedRole::Treasurer),
            AppRole::Member => Some(ScopedRole::Member),
            AppRole::SuperAdmin => None,
        }
    }

    pub fn as_app_role(self) -> AppRole {
        match self {
            ScopedRole::Admin => AppRole::Admin,
            ScopedRole::Treasurer => AppRole::Treasurer,
            ScopedRole::Member => AppRole::Member,
        }
    }
}

// O que sai do banco (Tabela user_roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: AppRole,
    pub mutuelle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// O escopo de autorização do usuário atual, derivado das linhas de user_roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleScope {
    SuperAdmin,
    Scoped {
        role: ScopedRole,
        mutuelle_id: Uuid,
        member_id: Option<Uuid>,
    },
    /// Papéis em várias mutuelles e nenhuma escolhida
    Ambiguous { mutuelle_ids: Vec<Uuid> },
    Unauthorized,
}

// Resposta de GET /api/users/me/scope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeResponse {
    pub role: Option<AppRole>,
    pub mutuelle_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
    /// Preenchido apenas quando é preciso escolher uma mutuelle
    pub mutuelle_ids: Vec<Uuid>,
}

impl From<&RoleScope> for ScopeResponse {
    fn from(scope: &RoleScope) -> Self {
        match scope {
            RoleScope::SuperAdmin => Self {
                role: Some(AppRole::SuperAdmin),
                mutuelle_id: None,
                member_id: None,
                mutuelle_ids: Vec::new(),
            },
            RoleScope::Scoped { role, mutuelle_id, member_id } => Self {
                role: Some(role.as_app_role()),
                mutuelle_id: Some(*mutuelle_id),
                member_id: *member_id,
                mutuelle_ids: Vec::new(),
            },
            RoleScope::Ambiguous { mutuelle_ids } => Self {
                role: None,
                mutuelle_id: None,
                member_id: None,
                mutuelle_ids: mutuelle_ids.clone(),
            },
            RoleScope::Unauthorized => Self {
                role: None,
                mutuelle_id: None,
                member_id: None,
                mutuelle_ids: Vec::new(),
            },
        }
    }
}

// O Payload para atribuir um papel
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantRolePayload {
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    #[schema(example = "tresorier@example.com")]
    pub email: String,

    pub role: AppRole,

    /// Ausente: usa a mutuelle do contexto (x-mutuelle-id). Para super_admin deve ficar ausente.
    pub mutuelle_id: Option<Uuid>,
}
