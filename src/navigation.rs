//! Navigation entries, gated by the session's permissions.

use eduke_core::{Authorizer, Gated, Permission, Role, filter_by_permission};
use eduke_models::{SessionUser, role_of};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    /// Shown when the session holds any of these.
    pub permissions: &'static [Permission],
}

impl Gated for NavItem {
    fn required_permissions(&self) -> &[Permission] {
        self.permissions
    }
}

/// Every navigation entry, in display order.
pub const NAVIGATION: [NavItem; 8] = [
    NavItem {
        label: "Dashboard",
        path: "/dashboard",
        permissions: &[Permission::ViewDashboard],
    },
    NavItem {
        label: "Courses",
        path: "/inventory",
        permissions: &[Permission::ManageInventory],
    },
    NavItem {
        label: "Fees",
        path: "/pos",
        permissions: &[Permission::ManagePos],
    },
    NavItem {
        label: "Students",
        path: "/customers",
        permissions: &[Permission::ViewStudentProfiles],
    },
    NavItem {
        label: "Grades",
        path: "/gradebook",
        permissions: &[Permission::EnterGrades],
    },
    NavItem {
        label: "Schedule",
        path: "/timetable",
        permissions: &[Permission::ManageTimetable],
    },
    NavItem {
        label: "Expenses",
        path: "/expenses",
        permissions: &[Permission::ViewReports],
    },
    NavItem {
        label: "Settings",
        path: "/settings",
        permissions: &[Permission::ManageSettings, Permission::ViewPrinterSettings],
    },
];

const STAFF_DASHBOARD_LABEL: &str = "Teacher";

/// Navigation entries visible to `session`.
pub fn navigation_for(session: Option<&SessionUser>, authorizer: &dyn Authorizer) -> Vec<NavItem> {
    navigation_for_role(role_of(session), authorizer)
}

pub fn navigation_for_role(role: Option<Role>, authorizer: &dyn Authorizer) -> Vec<NavItem> {
    let mut items = filter_by_permission(NAVIGATION, role, authorizer);

    // Staff land on the teacher dashboard
    if role == Some(Role::Staff) {
        for item in items.iter_mut().filter(|i| i.path == "/dashboard") {
            item.label = STAFF_DASHBOARD_LABEL;
        }
    }

    items
}
