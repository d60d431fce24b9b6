// src/services/access.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::roles::{RoleScope, ScopedRole},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Mutuelle,
    Member,
    ContributionConfig,
    Contribution,
    Expense,
    Meeting,
    Role,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Decide se o escopo pode ler/escrever o recurso dentro da mutuelle.
/// Papéis escopados nunca enxergam outra mutuelle.
pub fn can(scope: &RoleScope, mutuelle_id: Uuid, resource: Resource, access: Access) -> bool {
    match scope {
        RoleScope::SuperAdmin => true,
        RoleScope::Scoped { role, mutuelle_id: own, .. } => {
            if *own != mutuelle_id {
                return false;
            }
            match (role, access) {
                (_, Access::Read) => true,
                (ScopedRole::Admin, Access::Write) => true,
                (ScopedRole::Treasurer, Access::Write) => matches!(
                    resource,
                    Resource::Contribution | Resource::ContributionConfig | Resource::Expense
                ),
                (ScopedRole::Member, Access::Write) => resource == Resource::Contribution,
            }
        }
        RoleScope::Ambiguous { .. } | RoleScope::Unauthorized => false,
    }
}

pub fn ensure(scope: &RoleScope, mutuelle_id: Uuid, resource: Resource, access: Access) -> Result<(), AppError> {
    if can(scope, mutuelle_id, resource, access) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

// Criar mutuelles é exclusivo do super admin
pub fn can_create_mutuelle(scope: &RoleScope) -> bool {
    matches!(scope, RoleScope::SuperAdmin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoped(role: ScopedRole, mutuelle_id: Uuid) -> RoleScope {
        RoleScope::Scoped { role, mutuelle_id, member_id: None }
    }

    #[test]
    fn super_admin_reaches_every_mutuelle() {
        let any = Uuid::new_v4();
        assert!(can(&RoleScope::SuperAdmin, any, Resource::Member, Access::Write));
        assert!(can(&RoleScope::SuperAdmin, any, Resource::Role, Access::Write));
        assert!(can_create_mutuelle(&RoleScope::SuperAdmin));
    }

    #[test]
    fn scoped_roles_never_cross_tenants() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        for role in [ScopedRole::Admin, ScopedRole::Treasurer, ScopedRole::Member] {
            let scope = scoped(role, own);
            assert!(can(&scope, own, Resource::Member, Access::Read));
            assert!(!can(&scope, other, Resource::Member, Access::Read));
            assert!(!can(&scope, other, Resource::Contribution, Access::Write));
            assert!(!can_create_mutuelle(&scope));
        }
    }

    #[test]
    fn treasurer_writes_only_money_resources() {
        let own = Uuid::new_v4();
        let scope = scoped(ScopedRole::Treasurer, own);
        assert!(can(&scope, own, Resource::Contribution, Access::Write));
        assert!(can(&scope, own, Resource::ContributionConfig, Access::Write));
        assert!(can(&scope, own, Resource::Expense, Access::Write));
        assert!(!can(&scope, own, Resource::Member, Access::Write));
        assert!(!can(&scope, own, Resource::Meeting, Access::Write));
        assert!(!can(&scope, own, Resource::Role, Access::Write));
    }

    #[test]
    fn member_writes_only_contributions() {
        let own = Uuid::new_v4();
        let scope = scoped(ScopedRole::Member, own);
        assert!(can(&scope, own, Resource::Contribution, Access::Write));
        assert!(!can(&scope, own, Resource::Expense, Access::Write));
        assert!(can(&scope, own, Resource::Dashboard, Access::Read));
    }

    #[test]
    fn unresolved_scopes_get_nothing() {
        let m = Uuid::new_v4();
        let ambiguous = RoleScope::Ambiguous { mutuelle_ids: vec![m] };
        assert!(!can(&ambiguous, m, Resource::Member, Access::Read));
        assert!(!can(&RoleScope::Unauthorized, m, Resource::Member, Access::Read));
        assert!(matches!(
            ensure(&RoleScope::Unauthorized, m, Resource::Contribution, Access::Write),
            Err(AppError::Forbidden)
        ));
    }
}
