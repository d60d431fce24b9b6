// src/db/contribution_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        contribution::{Contribution, ContributionConfig, ContributionSummary, NewContribution},
        member::Member,
    },
};

/// Persistência do fluxo de cotisations (iniciar, verificar, histórico).
#[async_trait]
pub trait ContributionStore: Send + Sync {
    async fn find_member(&self, member_id: Uuid) -> Result<Option<Member>, AppError>;

    async fn find_config(&self, config_id: Uuid) -> Result<Option<ContributionConfig>, AppError>;

    /// Cotisation ainda pendente com a mesma mutuelle, membro, modelo e valor.
    async fn find_reusable_pending(&self, input: &NewContribution) -> Result<Option<Contribution>, AppError>;

    async fn insert_pending(&self, input: &NewContribution) -> Result<Contribution, AppError>;

    async fn find_contribution(&self, id: Uuid) -> Result<Option<Contribution>, AppError>;

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Contribution>, AppError>;

    /// Marca como paga e credita o saldo da mutuelle na mesma transação.
    /// `None` quando a linha não existe ou já estava paga.
    async fn mark_paid(&self, id: Uuid, reference: &str) -> Result<Option<Contribution>, AppError>;

    async fn list_contributions(&self, mutuelle_id: Uuid) -> Result<Vec<ContributionSummary>, AppError>;
}

#[derive(Clone)]
pub struct ContributionRepository {
    pool: PgPool,
}

impl ContributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributionStore for ContributionRepository {
    async fn find_member(&self, member_id: Uuid) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_config(&self, config_id: Uuid) -> Result<Option<ContributionConfig>, AppError> {
        let config =
            sqlx::query_as::<_, ContributionConfig>("SELECT * FROM contribution_configs WHERE id = $1")
                .bind(config_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(config)
    }

    async fn find_reusable_pending(&self, input: &NewContribution) -> Result<Option<Contribution>, AppError> {
        let contribution = sqlx::query_as::<_, Contribution>(
            r#"
            SELECT * FROM contributions
            WHERE mutuelle_id = $1
              AND member_id = $2
              AND config_id IS NOT DISTINCT FROM $3
              AND amount = $4
              AND status = 'pending'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(input.mutuelle_id)
        .bind(input.member_id)
        .bind(input.config_id)
        .bind(input.amount)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contribution)
    }

    async fn insert_pending(&self, input: &NewContribution) -> Result<Contribution, AppError> {
        let contribution = sqlx::query_as::<_, Contribution>(
            r#"
            INSERT INTO contributions (mutuelle_id, member_id, config_id, amount, status, payment_method)
            VALUES ($1, $2, $3, $4, 'pending', 'paystack')
            RETURNING *
            "#,
        )
        .bind(input.mutuelle_id)
        .bind(input.member_id)
        .bind(input.config_id)
        .bind(input.amount)
        .fetch_one(&self.pool)
        .await?;
        Ok(contribution)
    }

    async fn find_contribution(&self, id: Uuid) -> Result<Option<Contribution>, AppError> {
        let contribution = sqlx::query_as::<_, Contribution>("SELECT * FROM contributions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contribution)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Contribution>, AppError> {
        let contribution =
            sqlx::query_as::<_, Contribution>("SELECT * FROM contributions WHERE payment_reference = $1")
                .bind(reference)
                .fetch_optional(&self.pool)
                .await?;
        Ok(contribution)
    }

    async fn mark_paid(&self, id: Uuid, reference: &str) -> Result<Option<Contribution>, AppError> {
        let mut tx = self.pool.begin().await?;

        // A condição de status garante um único crédito por cotisation
        let updated = sqlx::query_as::<_, Contribution>(
            r#"
            UPDATE contributions
            SET status = 'paid',
                payment_reference = $2,
                paid_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND status <> 'paid'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reference)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(contribution) = &updated {
            sqlx::query(
                r#"
                UPDATE mutuelles
                SET total_balance = total_balance + $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(contribution.mutuelle_id)
            .bind(contribution.amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    async fn list_contributions(&self, mutuelle_id: Uuid) -> Result<Vec<ContributionSummary>, AppError> {
        let rows = sqlx::query_as::<_, ContributionSummary>(
            r#"
            SELECT c.*, m.full_name AS member_name, cc.name AS config_name
            FROM contributions c
            JOIN members m ON m.id = c.member_id
            LEFT JOIN contribution_configs cc ON cc.id = c.config_id
            WHERE c.mutuelle_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(mutuelle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
