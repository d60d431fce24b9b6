// src/services/role_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RoleStore,
    models::roles::{AppRole, RoleScope, ScopedRole, UserRole},
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct RoleService {
    store: Arc<dyn RoleStore>,
}

impl RoleService {
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        Self { store }
    }

    /// Resolve o escopo do usuário. Falhas do banco viram `Unauthorized`.
    pub async fn resolve(&self, user_id: Uuid, preferred: Option<Uuid>) -> RoleScope {
        match self.try_resolve(user_id, preferred).await {
            Ok(scope) => scope,
            Err(e) => {
                tracing::error!(%user_id, "Falha ao resolver papéis do usuário: {:?}", e);
                RoleScope::Unauthorized
            }
        }
    }

    async fn try_resolve(&self, user_id: Uuid, preferred: Option<Uuid>) -> Result<RoleScope, AppError> {
        // 1. Super admin global tem precedência
        if self.store.find_global_super_admin(user_id).await?.is_some() {
            return Ok(RoleScope::SuperAdmin);
        }

        // 2. Papéis escopados; linhas super_admin com mutuelle são descartadas
        let candidates: Vec<(Uuid, ScopedRole)> = self
            .store
            .list_scoped_roles(user_id)
            .await?
            .iter()
            .filter_map(|row| Some((row.mutuelle_id?, ScopedRole::from_app_role(row.role)?)))
            .collect();

        let mut mutuelle_ids: Vec<Uuid> = Vec::new();
        for (mutuelle_id, _) in &candidates {
            if !mutuelle_ids.contains(mutuelle_id) {
                mutuelle_ids.push(*mutuelle_id);
            }
        }

        // 3. Escolha da mutuelle
        let chosen = match preferred.filter(|p| mutuelle_ids.contains(p)) {
            Some(p) => p,
            None if mutuelle_ids.is_empty() => return Ok(RoleScope::Unauthorized),
            None if mutuelle_ids.len() == 1 => mutuelle_ids[0],
            None => return Ok(RoleScope::Ambiguous { mutuelle_ids }),
        };

        let Some(role) = candidates
            .iter()
            .filter(|(mutuelle_id, _)| *mutuelle_id == chosen)
            .map(|(_, role)| *role)
            .max()
        else {
            return Ok(RoleScope::Unauthorized);
        };

        // 4. Membro: localiza a entrada do quadro ligada ao perfil
        let member_id = if role == ScopedRole::Member {
            self.store.find_member_id(user_id, chosen).await?
        } else {
            None
        };

        Ok(RoleScope::Scoped { role, mutuelle_id: chosen, member_id })
    }

    pub async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError> {
        self.store.list_roles(user_id).await
    }

    /// Super admin concede qualquer papel; admin concede papéis escopados na própria mutuelle.
    /// Não consulta nada: roda antes de procurar o perfil alvo.
    pub fn authorize_grant(scope: &RoleScope, role: AppRole, mutuelle_id: Option<Uuid>) -> Result<(), AppError> {
        if !role.accepts_scope(mutuelle_id) {
            return Err(AppError::InvalidRoleScope);
        }

        match mutuelle_id {
            Some(mutuelle_id) => access::ensure(scope, mutuelle_id, Resource::Role, Access::Write),
            // Papel global: só super admin
            None if *scope == RoleScope::SuperAdmin => Ok(()),
            None => Err(AppError::Forbidden),
        }
    }

    pub async fn grant_role(
        &self,
        scope: &RoleScope,
        target_user: Uuid,
        role: AppRole,
        mutuelle_id: Option<Uuid>,
    ) -> Result<UserRole, AppError> {
        Self::authorize_grant(scope, role, mutuelle_id)?;

        let granted = self.store.assign_role(target_user, role, mutuelle_id).await?;
        tracing::info!(user_id = %target_user, role = ?role, mutuelle_id = ?mutuelle_id, "Papel atribuído");
        Ok(granted)
    }
}
