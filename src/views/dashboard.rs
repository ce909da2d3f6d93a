//! School dashboard: headline statistics and the financial report.
//!
//! Both aggregates are fetched together for the selected branch and date
//! range. If either request fails the whole view goes offline and each
//! aggregate falls back to its own snapshot.

use eduke_cache::{FetchOutcome, ViewState, keys, persist};
use eduke_core::Role;
use eduke_models::{BranchId, DashboardStats, DateRange, FinancialReport};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::settle;
use crate::state::AppState;

const VIEW: &str = "dashboard";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: Option<DashboardStats>,
    pub report: Option<FinancialReport>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Selection {
    branch: Option<BranchId>,
    range: DateRange,
}

pub struct DashboardView {
    state: AppState,
    selection: Mutex<Selection>,
    view: Mutex<ViewState<DashboardData>>,
}

impl DashboardView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            selection: Mutex::new(Selection::default()),
            view: Mutex::new(ViewState::new()),
        }
    }

    /// Restore the saved date range and show the snapshots stored for the
    /// current selection. Does not contact the server.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        let cache = &self.state.cache;

        if let Some(range) = cache.get::<DateRange>(&keys::preferences::date_range()).await {
            debug!(range = %range, "Restored dashboard date range");
            self.selection.lock().await.range = range;
        }

        let (branch, range) = self.effective_selection().await;
        let stats = cache.get(&keys::dashboard::stats(branch)).await;
        let report = cache.get(&keys::dashboard::report(range.days(), branch)).await;

        let hydrated = match (stats, report) {
            (None, None) => None,
            (stats, report) => Some(DashboardData { stats, report }),
        };
        if !self.view.lock().await.hydrate(hydrated) {
            debug!("Dashboard already refreshed, skipping snapshot hydration");
        }
    }

    /// Fetch both aggregates for the current selection.
    ///
    /// Returns whether the result was applied; `false` means a newer refresh
    /// was started while this one was in flight.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let ticket = self.view.lock().await.begin();
        let (branch, range) = self.effective_selection().await;
        let days = range.days();

        let stats_key = keys::dashboard::stats(branch);
        let report_key = keys::dashboard::report(days, branch);
        let api = &self.state.api;
        let cache = &self.state.cache;

        let outcome = match tokio::try_join!(
            api.dashboard_stats(branch),
            api.financial_report(days, branch)
        ) {
            Ok((stats, report)) => {
                persist(cache, &stats_key, &stats).await;
                persist(cache, &report_key, &report).await;
                FetchOutcome::Live(DashboardData {
                    stats: Some(stats),
                    report: Some(report),
                })
            }
            Err(e) => {
                warn!(error = %e, branch = ?branch, days, "Dashboard fetch failed, serving snapshots");
                let stats = cache.get(&stats_key).await;
                let report = cache.get(&report_key).await;
                match (stats, report) {
                    (None, None) => FetchOutcome::Offline(None),
                    (stats, report) => FetchOutcome::Offline(Some(DashboardData { stats, report })),
                }
            }
        };

        settle(VIEW, &self.view, ticket, outcome).await
    }

    /// Change the date range, remember it, and refresh.
    pub async fn select_date_range(&self, range: DateRange) -> bool {
        self.set_date_range(range).await;
        self.refresh().await
    }

    /// Change and remember the date range without fetching.
    pub async fn set_date_range(&self, range: DateRange) {
        self.selection.lock().await.range = range;
        persist(&self.state.cache, &keys::preferences::date_range(), &range).await;
        info!(range = %range, "Dashboard date range changed");
    }

    /// Change the branch filter and refresh.
    ///
    /// Ignored, returning `false`, when the session is locked to its branch.
    pub async fn select_branch(&self, branch: Option<BranchId>) -> bool {
        self.set_branch(branch).await && self.refresh().await
    }

    /// Change the branch filter without fetching. Returns `false` when the
    /// session is locked to its branch.
    pub async fn set_branch(&self, branch: Option<BranchId>) -> bool {
        if let Some(locked) = self.locked_branch() {
            debug!(requested = ?branch, locked = %locked, "Branch selection ignored for pinned session");
            return false;
        }

        self.selection.lock().await.branch = branch;
        true
    }

    /// The branch every request is pinned to, for branch-scoped sessions.
    pub fn locked_branch(&self) -> Option<BranchId> {
        self.state.session.as_ref().and_then(|s| s.pinned_branch())
    }

    /// The branch picker is offered to tenant-wide and platform sessions.
    pub fn shows_branch_selector(&self) -> bool {
        let role = self.state.role();
        self.state.authorizer.is_owner(role) || role == Some(Role::Superadmin)
    }

    /// Branch the next request will be filtered by.
    pub async fn selected_branch(&self) -> Option<BranchId> {
        self.effective_selection().await.0
    }

    pub async fn date_range(&self) -> DateRange {
        self.selection.lock().await.range
    }

    /// A copy of the current view state.
    pub async fn state(&self) -> ViewState<DashboardData> {
        self.view.lock().await.clone()
    }

    async fn effective_selection(&self) -> (Option<BranchId>, DateRange) {
        let selection = *self.selection.lock().await;
        (self.locked_branch().or(selection.branch), selection.range)
    }
}
