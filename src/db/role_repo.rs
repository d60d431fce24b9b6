// src/db/role_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::roles::{AppRole, UserRole},
};

/// Consultas de papéis usadas pelo resolvedor de escopo.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Linha super_admin com mutuelle_id nulo (escopo global).
    async fn find_global_super_admin(&self, user_id: Uuid) -> Result<Option<UserRole>, AppError>;

    /// Linhas com mutuelle_id preenchido, das mais antigas para as mais novas.
    async fn list_scoped_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError>;

    /// Entrada do quadro de membros ligada ao perfil nesta mutuelle.
    async fn find_member_id(&self, profile_id: Uuid, mutuelle_id: Uuid) -> Result<Option<Uuid>, AppError>;

    async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError>;

    /// Atribui o papel; se o usuário já o tiver neste escopo, devolve a linha existente.
    async fn assign_role(
        &self,
        user_id: Uuid,
        role: AppRole,
        mutuelle_id: Option<Uuid>,
    ) -> Result<UserRole, AppError>;
}

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_global_super_admin(&self, user_id: Uuid) -> Result<Option<UserRole>, AppError> {
        let role = sqlx::query_as::<_, UserRole>(
            r#"
            SELECT * FROM user_roles
            WHERE user_id = $1 AND role = 'super_admin' AND mutuelle_id IS NULL
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    async fn list_scoped_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError> {
        let roles = sqlx::query_as::<_, UserRole>(
            r#"
            SELECT * FROM user_roles
            WHERE user_id = $1 AND mutuelle_id IS NOT NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn find_member_id(&self, profile_id: Uuid, mutuelle_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let member_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM members
            WHERE profile_id = $1 AND mutuelle_id = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(profile_id)
        .bind(mutuelle_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member_id)
    }

    async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError> {
        let roles = sqlx::query_as::<_, UserRole>(
            "SELECT * FROM user_roles WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn assign_role(
        &self,
        user_id: Uuid,
        role: AppRole,
        mutuelle_id: Option<Uuid>,
    ) -> Result<UserRole, AppError> {
        // Conceder de novo devolve a linha existente
        let assigned = sqlx::query_as::<_, UserRole>(
            r#"
            WITH existing AS (
                SELECT * FROM user_roles
                WHERE user_id = $1 AND role = $2 AND mutuelle_id IS NOT DISTINCT FROM $3
                LIMIT 1
            ),
            inserted AS (
                INSERT INTO user_roles (user_id, role, mutuelle_id)
                SELECT $1, $2, $3
                WHERE NOT EXISTS (SELECT 1 FROM existing)
                RETURNING *
            )
            SELECT * FROM inserted
            UNION ALL
            SELECT * FROM existing
            "#,
        )
        .bind(user_id)
        .bind(role)
        .bind(mutuelle_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(assigned)
    }
}
