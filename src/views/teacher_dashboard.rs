//! A teacher's own week and the classes they teach.

use eduke_cache::{FetchOutcome, ViewState, fetch_with_fallback, keys};
use eduke_models::{DayOfWeek, GradeLevelId, TimetableEntry};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use super::{lessons_on, settle};
use crate::state::AppState;

const VIEW: &str = "teacher_dashboard";
const UNKNOWN_CLASS: &str = "Unknown Class";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedClass {
    pub grade_level_id: GradeLevelId,
    pub name: String,
}

pub struct TeacherDashboardView {
    state: AppState,
    entries: Mutex<ViewState<Vec<TimetableEntry>>>,
}

impl TeacherDashboardView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            entries: Mutex::new(ViewState::new()),
        }
    }

    /// Fetch the signed-in teacher's timetable.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let ticket = self.entries.lock().await.begin();

        let outcome = match &self.state.session {
            Some(session) => {
                let key = keys::timetable::mine(session.id);
                fetch_with_fallback(&self.state.cache, &key, self.state.api.my_timetable()).await
            }
            None => {
                warn!("No session, teacher timetable unavailable");
                FetchOutcome::Offline(None)
            }
        };

        settle(VIEW, &self.entries, ticket, outcome).await
    }

    /// Distinct classes in the timetable, in order of first appearance.
    pub async fn assigned_classes(&self) -> Vec<AssignedClass> {
        let entries = self.entries.lock().await;
        entries.data().map(|list| assigned_classes(list)).unwrap_or_default()
    }

    pub async fn entries_for(&self, day: DayOfWeek) -> Vec<TimetableEntry> {
        let entries = self.entries.lock().await;
        entries
            .data()
            .map(|list| lessons_on(list, day))
            .unwrap_or_default()
    }

    pub async fn state(&self) -> ViewState<Vec<TimetableEntry>> {
        self.entries.lock().await.clone()
    }
}

fn assigned_classes(entries: &[TimetableEntry]) -> Vec<AssignedClass> {
    let mut classes: Vec<AssignedClass> = Vec::new();
    for entry in entries {
        if classes.iter().any(|c| c.grade_level_id == entry.grade_level_id) {
            continue;
        }
        classes.push(AssignedClass {
            grade_level_id: entry.grade_level_id,
            name: entry
                .grade_level_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
        });
    }
    classes
}
