//! Weekly timetable management.

use eduke_cache::{Ticket, ViewState, fetch_with_fallback, keys, persist};
use eduke_core::{ClientError, Permission, Role};
use eduke_models::{DayOfWeek, GradeLevelId, TimetableEntry, TimetableEntryId, UserId};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::reference::{ReferenceData, fetch_reference};
use super::{lessons_on, settle};
use crate::state::AppState;

const VIEW: &str = "timetable";
const REFERENCE_VIEW: &str = "timetable_reference";

pub struct TimetableView {
    state: AppState,
    reference: Mutex<ViewState<ReferenceData>>,
    entries: Mutex<ViewState<Vec<TimetableEntry>>>,
    grade_level: Mutex<Option<GradeLevelId>>,
}

impl TimetableView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            reference: Mutex::new(ViewState::new()),
            entries: Mutex::new(ViewState::new()),
            grade_level: Mutex::new(None),
        }
    }

    /// Load the class and subject lists, then the entries.
    #[instrument(skip(self))]
    pub async fn load(&self) -> bool {
        let ticket = self.reference.lock().await.begin();
        let outcome = fetch_reference(&self.state, false).await;
        settle(REFERENCE_VIEW, &self.reference, ticket, outcome).await;

        self.refresh().await
    }

    /// Switch class and fetch its entries.
    pub async fn select_grade_level(&self, grade_level: Option<GradeLevelId>) -> bool {
        let ticket = {
            let mut entries = self.entries.lock().await;
            *self.grade_level.lock().await = grade_level;
            entries.begin()
        };
        self.fetch_entries(ticket, grade_level).await
    }

    /// Fetch entries for the selected class.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let (ticket, grade_level) = {
            let mut entries = self.entries.lock().await;
            (entries.begin(), *self.grade_level.lock().await)
        };
        self.fetch_entries(ticket, grade_level).await
    }

    // The class selection only changes together with `begin`, under the
    // entries lock, so a settled list always belongs to `grade_level`.
    async fn fetch_entries(&self, ticket: Ticket, grade_level: Option<GradeLevelId>) -> bool {
        let teacher = self.teacher_filter();
        let key = keys::timetable::entries(grade_level, teacher);
        let outcome = fetch_with_fallback(
            &self.state.cache,
            &key,
            self.state.api.timetable(grade_level, teacher),
        )
        .await;

        settle(VIEW, &self.entries, ticket, outcome).await
    }

    /// Staff only see their own lessons.
    pub fn teacher_filter(&self) -> Option<UserId> {
        self.state
            .session
            .as_ref()
            .filter(|s| s.role == Role::Staff)
            .map(|s| s.id)
    }

    /// Delete an entry on the server, then drop it from the displayed list
    /// and from the stored snapshot.
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: TimetableEntryId) -> Result<(), ClientError> {
        if !self.state.can(Permission::ManageTimetable) {
            return Err(ClientError::Forbidden(Permission::ManageTimetable));
        }

        self.state.api.delete_timetable_entry(id).await?;

        let snapshot = {
            let mut entries = self.entries.lock().await;
            let settled = !entries.is_loading();
            let remaining = entries.data_mut().map(|list| {
                list.retain(|e| e.id != id);
                list.clone()
            });
            // While loading, the list shown may belong to the previous class
            match remaining {
                Some(remaining) if settled => {
                    let grade_level = *self.grade_level.lock().await;
                    Some((keys::timetable::entries(grade_level, self.teacher_filter()), remaining))
                }
                Some(_) => {
                    debug!(entry_id = %id, "Fetch in flight, leaving timetable snapshot to it");
                    None
                }
                None => None,
            }
        };

        if let Some((key, remaining)) = snapshot {
            persist(&self.state.cache, &key, &remaining).await;
        }

        info!(entry_id = %id, "Timetable entry deleted");
        Ok(())
    }

    /// Lessons on `day`, earliest first.
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

    pub async fn reference(&self) -> ViewState<ReferenceData> {
        self.reference.lock().await.clone()
    }
}
