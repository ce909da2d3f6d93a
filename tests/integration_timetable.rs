mod common;

use common::{
    FakeApi, GRADE_4, GRADE_5, OTHER_TEACHER_ID, TEACHER_ID, app_state, memory_cache, session,
};
use eduke::views::{TeacherDashboardView, TimetableView};
use eduke_core::{ClientError, Permission, Role, RolePermissionMap, StaticAuthorizer};
use eduke_models::{DayOfWeek, TimetableEntryId};
use std::sync::Arc;
use std::time::Duration;

fn ids(entries: &[eduke_models::TimetableEntry]) -> Vec<i64> {
    entries.iter().map(|e| e.id.get()).collect()
}

#[tokio::test]
async fn test_staff_only_see_their_own_lessons() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api.clone(), memory_cache(), Some(session(Role::Staff, Some(1)))));

    assert_eq!(view.teacher_filter(), Some(TEACHER_ID));
    view.load().await;

    let entries = view.state().await;
    assert!(entries.data().unwrap().iter().all(|e| e.teacher_id == Some(TEACHER_ID)));
    assert!(api.calls().iter().any(|c| c == &format!("timetable:None:Some({TEACHER_ID:?})")));
}

#[tokio::test]
async fn test_admin_sees_every_teacher() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api, memory_cache(), Some(session(Role::BranchAdmin, Some(1)))));

    assert_eq!(view.teacher_filter(), None);
    view.select_grade_level(Some(GRADE_4)).await;

    let entries = view.state().await;
    let data = entries.data().unwrap();
    assert!(data.iter().any(|e| e.teacher_id == Some(OTHER_TEACHER_ID)));
    assert!(data.iter().all(|e| e.grade_level_id == GRADE_4));
}

#[tokio::test]
async fn test_entries_for_day_sorted_by_start() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api, memory_cache(), Some(session(Role::BranchAdmin, None))));
    view.load().await;

    assert_eq!(ids(&view.entries_for(DayOfWeek::Monday).await), vec![2, 1, 4]);
    assert!(view.entries_for(DayOfWeek::Friday).await.is_empty());
}

#[tokio::test]
async fn test_offline_timetable_uses_snapshot_for_same_filter() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api.clone(), memory_cache(), Some(session(Role::BranchAdmin, None))));
    view.select_grade_level(Some(GRADE_4)).await;

    api.set_offline(true);
    view.refresh().await;
    let state = view.state().await;
    assert!(state.is_offline());
    assert_eq!(state.data().unwrap().len(), 4);

    view.select_grade_level(Some(GRADE_5)).await;
    assert!(view.state().await.data().is_none());
}

#[tokio::test]
async fn test_delete_entry_removes_locally_and_from_snapshot() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api.clone(), memory_cache(), Some(session(Role::Staff, None))));
    view.load().await;

    view.delete_entry(TimetableEntryId::new(2)).await.unwrap();
    assert!(!api.timetable_ids().contains(&TimetableEntryId::new(2)));
    assert_eq!(ids(&view.entries_for(DayOfWeek::Monday).await), vec![1]);

    api.set_offline(true);
    view.refresh().await;
    let state = view.state().await;
    assert!(state.is_offline());
    assert!(state.data().unwrap().iter().all(|e| e.id != TimetableEntryId::new(2)));
}

#[tokio::test]
async fn test_delete_while_switching_class_keeps_snapshots_per_class() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api.clone(), memory_cache(), Some(session(Role::BranchAdmin, None))));
    view.select_grade_level(Some(GRADE_4)).await;

    api.delay_timetable(GRADE_5, Duration::from_millis(200));
    api.fail_timetable_for(GRADE_5);

    let (applied, deleted) = tokio::join!(view.select_grade_level(Some(GRADE_5)), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        view.delete_entry(TimetableEntryId::new(1)).await
    });
    assert!(applied);
    deleted.unwrap();

    // Grade 5 was never fetched successfully, so it has nothing to show
    let state = view.state().await;
    assert!(state.is_offline());
    assert!(state.data().is_none());

    api.set_offline(true);
    view.select_grade_level(Some(GRADE_4)).await;
    let state = view.state().await;
    assert!(state.is_offline());
    assert!(state.data().unwrap().iter().all(|e| e.grade_level_id == GRADE_4));
}

#[tokio::test]
async fn test_delete_requires_manage_timetable() {
    let api = FakeApi::new();
    let map = RolePermissionMap::from_grants([(Role::Staff, [Permission::ViewDashboard])]);
    let mut state = app_state(api.clone(), memory_cache(), Some(session(Role::Staff, None)));
    state.authorizer = Arc::new(StaticAuthorizer::new(Arc::new(map)));
    let view = TimetableView::new(state);

    let err = view.delete_entry(TimetableEntryId::new(1)).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(Permission::ManageTimetable)));
    assert!(api.timetable_ids().contains(&TimetableEntryId::new(1)));
}

#[tokio::test]
async fn test_delete_failure_keeps_entry() {
    let api = FakeApi::new();
    let view = TimetableView::new(app_state(api, memory_cache(), Some(session(Role::BranchAdmin, None))));
    view.load().await;

    let err = view.delete_entry(TimetableEntryId::new(99)).await.unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 404, .. }));
    assert_eq!(view.state().await.data().unwrap().len(), 5);
}

#[tokio::test]
async fn test_teacher_dashboard_assigned_classes() {
    let api = FakeApi::new();
    let view = TeacherDashboardView::new(app_state(api, memory_cache(), Some(session(Role::Staff, Some(1)))));
    view.refresh().await;

    let classes = view.assigned_classes().await;
    let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Grade 4", "Unknown Class"]);
    assert_eq!(classes[1].grade_level_id, GRADE_5);

    assert_eq!(ids(&view.entries_for(DayOfWeek::Monday).await), vec![2, 1]);
}

#[tokio::test]
async fn test_teacher_dashboard_offline() {
    let api = FakeApi::new();
    let cache = memory_cache();
    let view = TeacherDashboardView::new(app_state(api.clone(), cache.clone(), Some(session(Role::Staff, None))));
    view.refresh().await;

    api.set_offline(true);
    let reloaded = TeacherDashboardView::new(app_state(api, cache, Some(session(Role::Staff, None))));
    reloaded.refresh().await;

    let state = reloaded.state().await;
    assert!(state.is_offline());
    assert_eq!(state.data().unwrap().len(), 4);
    assert_eq!(reloaded.assigned_classes().await.len(), 2);
}

#[tokio::test]
async fn test_teacher_dashboard_without_session() {
    let api = FakeApi::new();
    let view = TeacherDashboardView::new(app_state(api.clone(), memory_cache(), None));
    view.refresh().await;

    assert!(view.state().await.is_offline());
    assert!(view.assigned_classes().await.is_empty());
    assert!(api.calls().is_empty());
}
