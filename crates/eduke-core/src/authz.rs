//! Authorization queries over a [`RolePermissionMap`].
//!
//! Call sites depend on the [`Authorizer`] trait rather than on the map
//! itself, so tests and alternate deployments can inject their own policy.

use std::sync::Arc;

use crate::permissions::{Permission, PermissionSet, Role, RolePermissionMap, Scope};

/// Answers permission questions for the role of the current session.
///
/// `None` stands for an unauthenticated session, which holds nothing.
pub trait Authorizer: Send + Sync {
    /// Whether `role` holds `permission`.
    fn has_permission(&self, role: Option<Role>, permission: Permission) -> bool;

    /// An owned copy of every permission `role` holds.
    fn permissions_for(&self, role: Option<Role>) -> PermissionSet;

    /// Whether `role` holds at least one of `permissions`.
    fn has_any_permission(&self, role: Option<Role>, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(role, *p))
    }

    /// Tenant-wide, non-platform administrator.
    fn is_owner(&self, role: Option<Role>) -> bool {
        matches!(role.map(Role::scope), Some(Scope::Tenant))
    }

    /// Branch admin or staff.
    fn is_branch_scoped(&self, role: Option<Role>) -> bool {
        matches!(role.map(Role::scope), Some(Scope::Branch))
    }
}

/// [`Authorizer`] backed by a fixed, shared policy.
#[derive(Debug, Clone)]
pub struct StaticAuthorizer {
    map: Arc<RolePermissionMap>,
}

impl StaticAuthorizer {
    pub fn new(map: Arc<RolePermissionMap>) -> Self {
        Self { map }
    }

    /// Authorizer over [`RolePermissionMap::standard`].
    pub fn standard() -> Self {
        Self::new(Arc::new(RolePermissionMap::standard()))
    }

    pub fn policy(&self) -> &RolePermissionMap {
        &self.map
    }
}

impl Authorizer for StaticAuthorizer {
    fn has_permission(&self, role: Option<Role>, permission: Permission) -> bool {
        match role {
            Some(role) => self.map.grants(role).contains(&permission),
            None => false,
        }
    }

    fn permissions_for(&self, role: Option<Role>) -> PermissionSet {
        match role {
            Some(role) => self.map.grants(role).clone(),
            None => PermissionSet::new(),
        }
    }
}
