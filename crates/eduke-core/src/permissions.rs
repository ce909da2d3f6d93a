//! Permission catalog for the Eduke client.
//!
//! This module defines the closed set of permissions and roles, the scope a
//! role operates in, and the static role-to-permission policy. The policy must
//! match the `ROLE_PERMISSIONS` mapping enforced by the API; client-side checks
//! only decide what is shown.
//!
//! # Example
//!
//! ```
//! use eduke_core::permissions::{Permission, Role, RolePermissionMap};
//!
//! let map = RolePermissionMap::standard();
//! assert!(map.grants(Role::Staff).contains(&Permission::EnterGrades));
//! assert!(!map.grants(Role::Staff).contains(&Permission::ManagePos));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownRole;

/// An owned set of permissions, ordered by declaration.
pub type PermissionSet = BTreeSet<Permission>;

// =============================================================================
// Permissions
// =============================================================================

/// One capability consulted by gating logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View the school dashboard
    ViewDashboard,
    /// View financial and expense reports
    ViewReports,
    /// Collect fees at the point of sale
    ManagePos,
    /// View fee collection history
    ViewSalesHistory,
    /// Manage courses and stock items
    ManageInventory,
    /// Manage user accounts
    ManageUsers,
    /// Manage tenant settings
    ManageSettings,
    /// Manage branches (campuses)
    ManageBranches,
    /// View receipt printer settings
    ViewPrinterSettings,
    /// Create and edit timetable entries
    ManageTimetable,
    /// Enter assessment marks
    EnterGrades,
    /// View student profiles
    ViewStudentProfiles,
    /// Manage subjects and curriculum
    ManageCurriculum,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 13] = [
        Permission::ViewDashboard,
        Permission::ViewReports,
        Permission::ManagePos,
        Permission::ViewSalesHistory,
        Permission::ManageInventory,
        Permission::ManageUsers,
        Permission::ManageSettings,
        Permission::ManageBranches,
        Permission::ViewPrinterSettings,
        Permission::ManageTimetable,
        Permission::EnterGrades,
        Permission::ViewStudentProfiles,
        Permission::ManageCurriculum,
    ];

    /// The stable wire identifier, e.g. `"view_dashboard"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewReports => "view_reports",
            Permission::ManagePos => "manage_pos",
            Permission::ViewSalesHistory => "view_sales_history",
            Permission::ManageInventory => "manage_inventory",
            Permission::ManageUsers => "manage_users",
            Permission::ManageSettings => "manage_settings",
            Permission::ManageBranches => "manage_branches",
            Permission::ViewPrinterSettings => "view_printer_settings",
            Permission::ManageTimetable => "manage_timetable",
            Permission::EnterGrades => "enter_grades",
            Permission::ViewStudentProfiles => "view_student_profiles",
            Permission::ManageCurriculum => "manage_curriculum",
        }
    }

    /// The full permission universe as a set.
    pub fn universe() -> PermissionSet {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Roles and scope
// =============================================================================

/// The authority level of an authenticated session.
///
/// Exactly one role is attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform-wide administrator
    Superadmin,
    /// School owner with access to every branch of the tenant
    ParentOrgAdmin,
    /// Campus manager scoped to one branch
    BranchAdmin,
    /// Teacher or office staff scoped to one branch
    Staff,
}

/// Where a role's data access reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Platform level, implicitly tenant-wide.
    Platform,
    /// Every branch of one tenant.
    Tenant,
    /// A single branch.
    Branch,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Superadmin,
        Role::ParentOrgAdmin,
        Role::BranchAdmin,
        Role::Staff,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::ParentOrgAdmin => "parent_org_admin",
            Role::BranchAdmin => "branch_admin",
            Role::Staff => "staff",
        }
    }

    pub const fn scope(self) -> Scope {
        match self {
            Role::Superadmin => Scope::Platform,
            Role::ParentOrgAdmin => Scope::Tenant,
            Role::BranchAdmin | Role::Staff => Scope::Branch,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// =============================================================================
// Role -> permission policy
// =============================================================================

/// Total mapping from [`Role`] to the permissions it holds.
///
/// Built once at startup and shared read-only. `superadmin` always holds the
/// full universe; a role with no grants holds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    grants: BTreeMap<Role, PermissionSet>,
}

impl RolePermissionMap {
    /// The product policy shipped with the application.
    pub fn standard() -> Self {
        use Permission::*;

        Self::from_grants([
            (
                Role::ParentOrgAdmin,
                vec![
                    ViewDashboard,
                    ViewReports,
                    ManagePos,
                    ViewSalesHistory,
                    ManageInventory,
                    ManageUsers,
                    ManageSettings,
                    ManageBranches,
                    ManageTimetable,
                    EnterGrades,
                    ViewStudentProfiles,
                    ManageCurriculum,
                ],
            ),
            (
                Role::BranchAdmin,
                vec![
                    ViewDashboard,
                    ViewReports,
                    ManagePos,
                    ViewSalesHistory,
                    ManageInventory,
                    ManageUsers,
                    ManageTimetable,
                    EnterGrades,
                    ViewStudentProfiles,
                ],
            ),
            (
                Role::Staff,
                vec![
                    ViewDashboard,
                    ViewSalesHistory,
                    ViewPrinterSettings,
                    ManageTimetable,
                    EnterGrades,
                    ViewStudentProfiles,
                ],
            ),
        ])
    }

    /// Build a policy from explicit grants.
    ///
    /// Grants listed for `superadmin` are ignored; it is always given the
    /// full universe. Repeated entries for a role are merged.
    pub fn from_grants<I, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut map: BTreeMap<Role, PermissionSet> =
            Role::ALL.into_iter().map(|r| (r, PermissionSet::new())).collect();

        for (role, permissions) in grants {
            if role == Role::Superadmin {
                continue;
            }
            map.entry(role).or_default().extend(permissions);
        }

        map.insert(Role::Superadmin, Permission::universe());

        Self { grants: map }
    }

    /// Permissions held by `role`.
    pub fn grants(&self, role: Role) -> &PermissionSet {
        // Every role is inserted at construction.
        &self.grants[&role]
    }
}

impl Default for RolePermissionMap {
    fn default() -> Self {
        Self::standard()
    }
}
