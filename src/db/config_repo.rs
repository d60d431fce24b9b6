// src/db/config_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contribution::{ContributionConfig, CreateConfigPayload, UpdateConfigPayload},
};

// Modelos de cotisation de uma mutuelle
#[derive(Clone)]
pub struct ConfigRepository {
    pool: PgPool,
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        mutuelle_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<ContributionConfig>, AppError> {
        let configs = sqlx::query_as::<_, ContributionConfig>(
            r#"
            SELECT * FROM contribution_configs
            WHERE mutuelle_id = $1 AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(mutuelle_id)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;
        Ok(configs)
    }

    pub async fn create(
        &self,
        mutuelle_id: Uuid,
        input: &CreateConfigPayload,
    ) -> Result<ContributionConfig, AppError> {
        let config = sqlx::query_as::<_, ContributionConfig>(
            r#"
            INSERT INTO contribution_configs (mutuelle_id, name, type, amount, frequency, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(mutuelle_id)
        .bind(&input.name)
        .bind(input.kind)
        .bind(input.amount)
        .bind(input.frequency.as_deref())
        .bind(input.description.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }

    // COALESCE: campo ausente mantém o valor atual
    pub async fn update(
        &self,
        mutuelle_id: Uuid,
        id: Uuid,
        input: &UpdateConfigPayload,
    ) -> Result<Option<ContributionConfig>, AppError> {
        let config = sqlx::query_as::<_, ContributionConfig>(
            r#"
            UPDATE contribution_configs
            SET name = COALESCE($3, name),
                type = COALESCE($4, type),
                amount = COALESCE($5, amount),
                frequency = COALESCE($6, frequency),
                is_active = COALESCE($7, is_active),
                description = COALESCE($8, description),
                updated_at = NOW()
            WHERE id = $1 AND mutuelle_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(mutuelle_id)
        .bind(input.name.as_deref())
        .bind(input.kind)
        .bind(input.amount)
        .bind(input.frequency.as_deref())
        .bind(input.is_active)
        .bind(input.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(config)
    }
}
