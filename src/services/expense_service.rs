// src/services/expense_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ExpenseRepository,
    models::{
        expense::{CreateExpensePayload, Expense},
        roles::RoleScope,
    },
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct ExpenseService {
    repo: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(repo: ExpenseRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, scope: &RoleScope, mutuelle_id: Uuid) -> Result<Vec<Expense>, AppError> {
        if !access::can(scope, mutuelle_id, Resource::Expense, Access::Read) {
            return Ok(Vec::new());
        }
        self.repo.list(mutuelle_id).await
    }

    pub async fn create(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        paid_by: Uuid,
        input: &CreateExpensePayload,
    ) -> Result<Expense, AppError> {
        access::ensure(scope, mutuelle_id, Resource::Expense, Access::Write)?;
        let expense = self.repo.create(mutuelle_id, paid_by, input).await?;
        tracing::info!(expense_id = %expense.id, amount = %expense.amount, "Despesa lançada");
        Ok(expense)
    }

    pub async fn delete(&self, scope: &RoleScope, mutuelle_id: Uuid, id: Uuid) -> Result<(), AppError> {
        access::ensure(scope, mutuelle_id, Resource::Expense, Access::Write)?;
        if !self.repo.delete(mutuelle_id, id).await? {
            return Err(AppError::NotFound("expense"));
        }
        Ok(())
    }
}
