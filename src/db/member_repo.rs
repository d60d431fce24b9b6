// src/db/member_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::member::{Member, MemberPayload, MemberStatus},
};

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        mutuelle_id: Uuid,
        status: Option<MemberStatus>,
    ) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE mutuelle_id = $1 AND ($2::member_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(mutuelle_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn create(&self, mutuelle_id: Uuid, input: &MemberPayload) -> Result<Member, AppError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (mutuelle_id, full_name, email, phone, status, joined_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'active'::member_status), COALESCE($6, NOW()))
            RETURNING *
            "#,
        )
        .bind(mutuelle_id)
        .bind(&input.full_name)
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.status)
        .bind(input.joined_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }

    pub async fn update(
        &self,
        mutuelle_id: Uuid,
        id: Uuid,
        input: &MemberPayload,
    ) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET full_name = $3,
                email = $4,
                phone = $5,
                status = COALESCE($6, status),
                joined_at = COALESCE($7, joined_at),
                updated_at = NOW()
            WHERE id = $1 AND mutuelle_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(mutuelle_id)
        .bind(&input.full_name)
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.status)
        .bind(input.joined_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    // Exclusão definitiva (sem soft-delete)
    pub async fn delete(&self, mutuelle_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1 AND mutuelle_id = $2")
            .bind(id)
            .bind(mutuelle_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Liga ao perfil recém-criado as entradas do quadro que têm o mesmo e-mail.
    pub async fn link_profile_by_email<'e, E>(
        &self,
        executor: E,
        profile_id: Uuid,
        email: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET profile_id = $1, updated_at = NOW()
            WHERE profile_id IS NULL AND lower(email) = lower($2)
            "#,
        )
        .bind(profile_id)
        .bind(email)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
