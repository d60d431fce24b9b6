// src/db/expense_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::expense::{CreateExpensePayload, Expense},
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, mutuelle_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE mutuelle_id = $1 ORDER BY paid_at DESC",
        )
        .bind(mutuelle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    // Lança a despesa e debita o saldo da mutuelle
    pub async fn create(
        &self,
        mutuelle_id: Uuid,
        paid_by: Uuid,
        input: &CreateExpensePayload,
    ) -> Result<Expense, AppError> {
        let mut tx = self.pool.begin().await?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (mutuelle_id, title, category, description, amount, paid_by, paid_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()))
            RETURNING *
            "#,
        )
        .bind(mutuelle_id)
        .bind(&input.title)
        .bind(&input.category)
        .bind(input.description.as_deref())
        .bind(input.amount)
        .bind(paid_by)
        .bind(input.paid_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE mutuelles SET total_balance = total_balance - $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(mutuelle_id)
        .bind(expense.amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(expense)
    }

    // Remove a despesa e devolve o valor ao saldo
    pub async fn delete(&self, mutuelle_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Expense>(
            "DELETE FROM expenses WHERE id = $1 AND mutuelle_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(mutuelle_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(expense) = deleted else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE mutuelles SET total_balance = total_balance + $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(mutuelle_id)
        .bind(expense.amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
