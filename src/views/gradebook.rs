//! Mark entry for one class, subject and assessment.

use std::collections::HashMap;

use eduke_cache::{FetchOutcome, ViewState, fetch_with_fallback, keys};
use eduke_core::{ClientError, Permission};
use eduke_models::{
    Assessment, AssessmentId, EnterGradeDto, GradeLevelId, GradeRecord, Student, StudentId,
    SubjectId,
};
use futures::future::try_join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use validator::Validate;

use super::reference::{ReferenceData, fetch_reference};
use super::settle;
use crate::state::AppState;

const VIEW: &str = "gradebook";
const ROSTER_VIEW: &str = "gradebook_roster";

#[derive(Debug, Default)]
struct GradeForm {
    grade_level: Option<GradeLevelId>,
    subject: Option<SubjectId>,
    assessment: Option<AssessmentId>,
    marks: HashMap<StudentId, f64>,
    remarks: HashMap<StudentId, String>,
}

impl GradeForm {
    fn clear_entries(&mut self) {
        self.marks.clear();
        self.remarks.clear();
    }
}

pub struct GradebookView {
    state: AppState,
    reference: Mutex<ViewState<ReferenceData>>,
    roster: Mutex<ViewState<Vec<Student>>>,
    form: Mutex<GradeForm>,
}

impl GradebookView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            reference: Mutex::new(ViewState::new()),
            roster: Mutex::new(ViewState::new()),
            form: Mutex::new(GradeForm::default()),
        }
    }

    /// Load grade levels, subjects and assessments.
    #[instrument(skip(self))]
    pub async fn load(&self) -> bool {
        let ticket = self.reference.lock().await.begin();
        let outcome = fetch_reference(&self.state, true).await;
        settle(VIEW, &self.reference, ticket, outcome).await
    }

    /// Select a class and load its students. `None` selects all classes,
    /// which shows no roster. Entered marks and remarks are discarded.
    #[instrument(skip(self))]
    pub async fn select_grade_level(&self, grade_level: Option<GradeLevelId>) -> bool {
        {
            let mut form = self.form.lock().await;
            form.grade_level = grade_level;
            form.clear_entries();
        }

        let ticket = self.roster.lock().await.begin();
        let outcome = match grade_level {
            Some(id) => {
                let key = keys::academics::students(id);
                fetch_with_fallback(&self.state.cache, &key, self.state.api.students(id)).await
            }
            None => FetchOutcome::Live(Vec::new()),
        };

        settle(ROSTER_VIEW, &self.roster, ticket, outcome).await
    }

    pub async fn select_subject(&self, subject: Option<SubjectId>) {
        self.form.lock().await.subject = subject;
    }

    pub async fn select_assessment(&self, assessment: Option<AssessmentId>) {
        self.form.lock().await.assessment = assessment;
    }

    /// Record the mark typed for `student`. Input that is not a number
    /// records zero.
    pub async fn set_mark(&self, student: StudentId, input: &str) {
        let mark = parse_mark(input);
        self.form.lock().await.marks.insert(student, mark);
    }

    pub async fn set_remarks(&self, student: StudentId, remarks: impl Into<String>) {
        self.form.lock().await.remarks.insert(student, remarks.into());
    }

    pub async fn mark(&self, student: StudentId) -> Option<f64> {
        self.form.lock().await.marks.get(&student).copied()
    }

    /// Whether there is anything to save.
    pub async fn has_entries(&self) -> bool {
        !self.form.lock().await.marks.is_empty()
    }

    /// Maximum marks of the selected assessment, for display.
    pub async fn max_marks(&self) -> f64 {
        let selected = self.form.lock().await.assessment;
        let reference = self.reference.lock().await;
        let assessment: Option<&Assessment> = reference
            .data()
            .and_then(|r| r.assessments.iter().find(|a| Some(a.id) == selected));
        assessment.map_or(eduke_models::academics::DEFAULT_MAX_MARKS, |a| a.max_marks())
    }

    /// Submit every entered mark for the selected subject and assessment.
    ///
    /// Requires `enter_grades`. Entries are validated before anything is
    /// sent, then submitted concurrently; the first failure is returned.
    #[instrument(skip(self))]
    pub async fn save_all(&self) -> Result<Vec<GradeRecord>, ClientError> {
        if !self.state.can(Permission::EnterGrades) {
            return Err(ClientError::Forbidden(Permission::EnterGrades));
        }

        let grades = {
            let form = self.form.lock().await;
            let (Some(subject_id), Some(assessment_id)) = (form.subject, form.assessment) else {
                return Err(ClientError::Precondition(
                    "Please select a subject and assessment".to_string(),
                ));
            };

            let mut students: Vec<StudentId> = form.marks.keys().copied().collect();
            students.sort();

            students
                .into_iter()
                .map(|student_id| EnterGradeDto {
                    student_id,
                    subject_id,
                    assessment_id,
                    marks_obtained: form.marks[&student_id],
                    remarks: form.remarks.get(&student_id).cloned().unwrap_or_default(),
                })
                .collect::<Vec<_>>()
        };

        for grade in &grades {
            grade
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;
        }

        if grades.is_empty() {
            debug!("No marks entered, nothing to save");
            return Ok(Vec::new());
        }

        let api = &self.state.api;
        let records = try_join_all(grades.iter().map(|grade| api.enter_grade(grade))).await?;

        info!(count = records.len(), "Grades saved");
        Ok(records)
    }

    pub async fn reference(&self) -> ViewState<ReferenceData> {
        self.reference.lock().await.clone()
    }

    pub async fn roster(&self) -> ViewState<Vec<Student>> {
        self.roster.lock().await.clone()
    }
}

fn parse_mark(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|mark| mark.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mark() {
        assert_eq!(parse_mark("78.5"), 78.5);
        assert_eq!(parse_mark(" 40 "), 40.0);
        assert_eq!(parse_mark("abc"), 0.0);
        assert_eq!(parse_mark(""), 0.0);
        assert_eq!(parse_mark("NaN"), 0.0);
    }
}
