// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{dashboard::DashboardSummary, roles::RoleScope},
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    // Fora do escopo a mutuelle simplesmente "não existe"
    pub async fn get_summary(&self, scope: &RoleScope, mutuelle_id: Uuid) -> Result<DashboardSummary, AppError> {
        if !access::can(scope, mutuelle_id, Resource::Dashboard, Access::Read) {
            return Err(AppError::NotFound("mutuelle"));
        }
        self.repo
            .get_summary(mutuelle_id)
            .await?
            .ok_or(AppError::NotFound("mutuelle"))
    }
}
