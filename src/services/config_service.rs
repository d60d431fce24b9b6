// src/services/config_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ConfigRepository,
    models::{
        contribution::{ContributionConfig, CreateConfigPayload, UpdateConfigPayload},
        roles::RoleScope,
    },
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct ConfigService {
    repo: ConfigRepository,
}

impl ConfigService {
    pub fn new(repo: ConfigRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        active: Option<bool>,
    ) -> Result<Vec<ContributionConfig>, AppError> {
        if !access::can(scope, mutuelle_id, Resource::ContributionConfig, Access::Read) {
            return Ok(Vec::new());
        }
        self.repo.list(mutuelle_id, active).await
    }

    pub async fn create(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        input: &CreateConfigPayload,
    ) -> Result<ContributionConfig, AppError> {
        access::ensure(scope, mutuelle_id, Resource::ContributionConfig, Access::Write)?;
        self.repo.create(mutuelle_id, input).await
    }

    // Inclui ativar/desativar (isActive)
    pub async fn update(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        id: Uuid,
        input: &UpdateConfigPayload,
    ) -> Result<ContributionConfig, AppError> {
        access::ensure(scope, mutuelle_id, Resource::ContributionConfig, Access::Write)?;
        self.repo
            .update(mutuelle_id, id, input)
            .await?
            .ok_or(AppError::NotFound("contribution_config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::roles::ScopedRole, test_support::lazy_pool};

    #[tokio::test]
    async fn member_cannot_toggle_a_config() {
        let mutuelle = Uuid::new_v4();
        let scope = RoleScope::Scoped { role: ScopedRole::Member, mutuelle_id: mutuelle, member_id: None };
        let svc = ConfigService::new(ConfigRepository::new(lazy_pool()));
        let input = UpdateConfigPayload {
            name: None,
            kind: None,
            amount: None,
            frequency: None,
            is_active: Some(false),
            description: None,
        };

        let result = svc.update(&scope, mutuelle, Uuid::new_v4(), &input).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
