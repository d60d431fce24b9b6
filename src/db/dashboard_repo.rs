// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral num único SELECT (snapshot consistente)
    pub async fn get_summary(&self, mutuelle_id: Uuid) -> Result<Option<DashboardSummary>, AppError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM members
                  WHERE mutuelle_id = mu.id AND status = 'active') AS member_count,
                (SELECT COALESCE(SUM(amount), 0) FROM contributions
                  WHERE mutuelle_id = mu.id AND status = 'paid') AS paid_contributions,
                (SELECT COUNT(*) FROM contributions
                  WHERE mutuelle_id = mu.id AND status = 'pending') AS pending_contributions,
                (SELECT COUNT(*) FROM meetings
                  WHERE mutuelle_id = mu.id) AS meeting_count,
                (SELECT COALESCE(SUM(amount), 0) FROM expenses
                  WHERE mutuelle_id = mu.id) AS expenses_total,
                mu.total_balance
            FROM mutuelles mu
            WHERE mu.id = $1
            "#,
        )
        .bind(mutuelle_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(summary)
    }
}
