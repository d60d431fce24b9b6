// src/db/mutuelle_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::mutuelle::Mutuelle};

#[derive(Clone)]
pub struct MutuelleRepository {
    pool: PgPool,
}

impl MutuelleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Mutuelle>, AppError> {
        let mutuelles =
            sqlx::query_as::<_, Mutuelle>("SELECT * FROM mutuelles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(mutuelles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Mutuelle>, AppError> {
        let mutuelle = sqlx::query_as::<_, Mutuelle>("SELECT * FROM mutuelles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mutuelle)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        created_by: Uuid,
    ) -> Result<Mutuelle, AppError> {
        let mutuelle = sqlx::query_as::<_, Mutuelle>(
            r#"
            INSERT INTO mutuelles (name, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(mutuelle)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Mutuelle>, AppError> {
        let mutuelle = sqlx::query_as::<_, Mutuelle>(
            r#"
            UPDATE mutuelles
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(mutuelle)
    }
}
