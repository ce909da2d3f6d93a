//! The signed-in user as reported by the identity provider.

use eduke_core::{Role, Scope};
use serde::{Deserialize, Serialize};

use crate::ids::{BranchId, UserId};

/// Identity of the current session.
///
/// The client treats this as opaque input from the login flow; the role is
/// the only field consulted for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub role: Role,
    /// Branch the user is assigned to (None for tenant-wide users)
    pub branch_id: Option<BranchId>,
    pub full_name: String,
}

impl SessionUser {
    pub fn new(id: UserId, role: Role, branch_id: Option<BranchId>, full_name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            branch_id,
            full_name: full_name.into(),
        }
    }

    /// The branch every query of this session is pinned to, if any.
    ///
    /// Only branch-scoped roles are pinned, and only when a branch is assigned.
    pub fn pinned_branch(&self) -> Option<BranchId> {
        match self.role.scope() {
            Scope::Branch => self.branch_id,
            Scope::Platform | Scope::Tenant => None,
        }
    }
}

/// Role of an optional session; `None` when nobody is signed in.
pub fn role_of(session: Option<&SessionUser>) -> Option<Role> {
    session.map(|s| s.role)
}
