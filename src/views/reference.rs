//! Grade levels, subjects and assessments shared by the academic views.

use eduke_cache::{FetchOutcome, fetch_with_fallback, keys};
use eduke_models::{Assessment, GradeLevel, Subject};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub grade_levels: Vec<GradeLevel>,
    pub subjects: Vec<Subject>,
    pub assessments: Vec<Assessment>,
}

/// Fetch the reference lists concurrently, each with its own fallback.
///
/// The result is live only when every list came from the server. Lists with
/// neither a live answer nor a snapshot are left empty.
pub(crate) async fn fetch_reference(
    state: &AppState,
    with_assessments: bool,
) -> FetchOutcome<ReferenceData> {
    let cache = &state.cache;
    let api = &state.api;

    let grade_levels_key = keys::academics::grade_levels();
    let subjects_key = keys::academics::subjects();
    let assessments_key = keys::academics::assessments();

    let assessments = async {
        if with_assessments {
            fetch_with_fallback(cache, &assessments_key, api.assessments()).await
        } else {
            FetchOutcome::Live(Vec::<Assessment>::new())
        }
    };

    let (grade_levels, subjects, assessments) = tokio::join!(
        fetch_with_fallback(cache, &grade_levels_key, api.grade_levels()),
        fetch_with_fallback(cache, &subjects_key, api.subjects()),
        assessments,
    );

    let live = grade_levels.is_live() && subjects.is_live() && assessments.is_live();
    let any_data = matches!(grade_levels, FetchOutcome::Live(_) | FetchOutcome::Offline(Some(_)))
        || matches!(subjects, FetchOutcome::Live(_) | FetchOutcome::Offline(Some(_)))
        || matches!(assessments, FetchOutcome::Live(_) | FetchOutcome::Offline(Some(_)));

    let data = ReferenceData {
        grade_levels: grade_levels.into_data().unwrap_or_default(),
        subjects: subjects.into_data().unwrap_or_default(),
        assessments: assessments.into_data().unwrap_or_default(),
    };

    match (live, any_data) {
        (true, _) => FetchOutcome::Live(data),
        (false, true) => FetchOutcome::Offline(Some(data)),
        (false, false) => FetchOutcome::Offline(None),
    }
}
