// src/services/mutuelle_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MutuelleRepository,
    models::{
        mutuelle::{Mutuelle, MutuellePayload},
        roles::RoleScope,
    },
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct MutuelleService {
    repo: MutuelleRepository,
}

impl MutuelleService {
    pub fn new(repo: MutuelleRepository) -> Self {
        Self { repo }
    }

    /// Super admin vê todas; os demais só a própria.
    pub async fn list(&self, scope: &RoleScope) -> Result<Vec<Mutuelle>, AppError> {
        match scope {
            RoleScope::SuperAdmin => self.repo.list_all().await,
            RoleScope::Scoped { mutuelle_id, .. } => {
                Ok(self.repo.find_by_id(*mutuelle_id).await?.into_iter().collect())
            }
            RoleScope::Ambiguous { .. } | RoleScope::Unauthorized => Ok(Vec::new()),
        }
    }

    pub async fn create(
        &self,
        scope: &RoleScope,
        created_by: Uuid,
        input: &MutuellePayload,
    ) -> Result<Mutuelle, AppError> {
        if !access::can_create_mutuelle(scope) {
            return Err(AppError::Forbidden);
        }
        let mutuelle = self
            .repo
            .create(&input.name, input.description.as_deref(), created_by)
            .await?;
        tracing::info!(mutuelle_id = %mutuelle.id, "Mutuelle criada");
        Ok(mutuelle)
    }

    pub async fn update(
        &self,
        scope: &RoleScope,
        id: Uuid,
        input: &MutuellePayload,
    ) -> Result<Mutuelle, AppError> {
        access::ensure(scope, id, Resource::Mutuelle, Access::Write)?;
        self.repo
            .update(id, &input.name, input.description.as_deref())
            .await?
            .ok_or(AppError::NotFound("mutuelle"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::roles::ScopedRole, test_support::lazy_pool};

    fn payload() -> MutuellePayload {
        MutuellePayload { name: "Mutuelle des Enseignants".to_string(), description: None }
    }

    #[tokio::test]
    async fn only_super_admin_creates_mutuelles() {
        let svc = MutuelleService::new(MutuelleRepository::new(lazy_pool()));
        let admin = RoleScope::Scoped { role: ScopedRole::Admin, mutuelle_id: Uuid::new_v4(), member_id: None };

        let result = svc.create(&admin, Uuid::new_v4(), &payload()).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn treasurer_cannot_rename_the_mutuelle() {
        let svc = MutuelleService::new(MutuelleRepository::new(lazy_pool()));
        let mutuelle = Uuid::new_v4();
        let scope = RoleScope::Scoped { role: ScopedRole::Treasurer, mutuelle_id: mutuelle, member_id: None };

        let result = svc.update(&scope, mutuelle, &payload()).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn ambiguous_scope_lists_nothing() {
        let svc = MutuelleService::new(MutuelleRepository::new(lazy_pool()));
        let scope = RoleScope::Ambiguous { mutuelle_ids: vec![Uuid::new_v4(), Uuid::new_v4()] };
        assert!(svc.list(&scope).await.expect("list").is_empty());
    }
}
