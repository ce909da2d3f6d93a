//! View controllers.
//!
//! Each controller owns one or more [`ViewState`]s and drives them through
//! the cache-then-revalidate cycle. Controllers take `&self` so that a new
//! request can be issued while an older one is still in flight; only the
//! most recently started request of a view is applied.

pub mod dashboard;
pub mod gradebook;
pub mod reference;
pub mod teacher_dashboard;
pub mod timetable;

use eduke_cache::{FetchOutcome, Ticket, ViewState};
use eduke_models::{DayOfWeek, TimetableEntry};
use tokio::sync::Mutex;

pub use dashboard::{DashboardData, DashboardView};
pub use gradebook::GradebookView;
pub use reference::ReferenceData;
pub use teacher_dashboard::{AssignedClass, TeacherDashboardView};
pub use timetable::TimetableView;

/// Apply `outcome` to `slot` if `ticket` is still current.
///
/// Returns whether the outcome was applied.
pub(crate) async fn settle<T>(
    view: &'static str,
    slot: &Mutex<ViewState<T>>,
    ticket: Ticket,
    outcome: FetchOutcome<T>,
) -> bool {
    let label = if outcome.is_live() { "live" } else { "offline" };
    metrics::counter!("eduke_fetch_total", "view" => view, "outcome" => label).increment(1);

    let applied = slot.lock().await.resolve(ticket, outcome);
    if !applied {
        metrics::counter!("eduke_stale_results_discarded_total", "view" => view).increment(1);
    }
    applied
}

/// Lessons on `day`, earliest first.
pub(crate) fn lessons_on(entries: &[TimetableEntry], day: DayOfWeek) -> Vec<TimetableEntry> {
    let mut lessons: Vec<TimetableEntry> = entries
        .iter()
        .filter(|e| e.day_of_week == day)
        .cloned()
        .collect();
    lessons.sort_by_key(|e| e.start_time);
    lessons
}
