use eduke::navigation::{NAVIGATION, navigation_for, navigation_for_role};
use eduke_core::{Gated, Permission, Role, StaticAuthorizer, filter_by_permission};
use eduke_models::{BranchId, SessionUser, UserId};

struct Action {
    name: &'static str,
    permissions: Vec<Permission>,
}

impl Gated for Action {
    fn required_permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

fn action(name: &'static str, permissions: &[Permission]) -> Action {
    Action {
        name,
        permissions: permissions.to_vec(),
    }
}

fn labels(role: Role) -> Vec<&'static str> {
    let authz = StaticAuthorizer::standard();
    navigation_for_role(Some(role), &authz)
        .into_iter()
        .map(|i| i.label)
        .collect()
}

#[test]
fn test_filter_keeps_order_and_drops_untagged() {
    let authz = StaticAuthorizer::standard();
    let actions = vec![
        action("collect_fee", &[Permission::ManagePos]),
        action("record_marks", &[Permission::EnterGrades]),
        action("untagged", &[]),
        action("either", &[Permission::ManageBranches, Permission::ViewDashboard]),
    ];

    let visible = filter_by_permission(&actions, Some(Role::Staff), &authz);
    let names: Vec<&str> = visible.iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["record_marks", "either"]);
}

#[test]
fn test_filter_without_session_is_empty() {
    let authz = StaticAuthorizer::standard();
    let actions = vec![action("dashboard", &[Permission::ViewDashboard])];
    assert!(filter_by_permission(actions, None, &authz).is_empty());
}

#[test]
fn test_navigation_per_role() {
    assert_eq!(
        labels(Role::Staff),
        vec!["Teacher", "Students", "Grades", "Schedule", "Settings"]
    );
    assert_eq!(
        labels(Role::BranchAdmin),
        vec![
            "Dashboard",
            "Courses",
            "Fees",
            "Students",
            "Grades",
            "Schedule",
            "Expenses"
        ]
    );
    assert_eq!(labels(Role::ParentOrgAdmin).len(), NAVIGATION.len());
}

#[test]
fn test_navigation_for_session() {
    let authz = StaticAuthorizer::standard();
    let staff = SessionUser::new(UserId::new(14), Role::Staff, Some(BranchId::new(2)), "T");

    let items = navigation_for(Some(&staff), &authz);
    assert_eq!(items.first().map(|i| i.path), Some("/dashboard"));
    assert!(items.iter().all(|i| i.path != "/pos"));
}
