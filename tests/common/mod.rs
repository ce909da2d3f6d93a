use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveTime;
use eduke::AppState;
use eduke_cache::{MemoryStore, SharedStore, SnapshotCache};
use eduke_client::SchoolApi;
use eduke_core::{ClientError, Role, StaticAuthorizer};
use eduke_models::{
    Assessment, AssessmentId, BranchId, DashboardStats, DayOfWeek, EnterGradeDto,
    FinancialReport, GradeLevel, GradeLevelId, GradeRecord, SessionUser, Student, StudentId,
    Subject, SubjectId, TimetableEntry, TimetableEntryId, UserId,
};

/// Teacher that owns the fixture timetable's Grade 4 lessons.
pub const TEACHER_ID: UserId = UserId::new(14);
pub const OTHER_TEACHER_ID: UserId = UserId::new(15);

pub const GRADE_4: GradeLevelId = GradeLevelId::new(4);
pub const GRADE_5: GradeLevelId = GradeLevelId::new(5);

/// Scripted in-memory school API.
///
/// Responses are derived from the request parameters so tests can tell
/// which branch or date range was asked for: `total_students` is the branch
/// id times 100 (500 without a branch) and `total_revenue` is the number of
/// days times 1000.
#[derive(Default)]
pub struct FakeApi {
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
    report_delays: Mutex<HashMap<u32, Duration>>,
    rejected_grade: Mutex<Option<StudentId>>,
    timetable: Mutex<Vec<TimetableEntry>>,
    timetable_delays: Mutex<HashMap<GradeLevelId, Duration>>,
    unreachable_grades: Mutex<Vec<GradeLevelId>>,
    entered: Mutex<Vec<EnterGradeDto>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new() -> Arc<Self> {
        let api = Self::default();
        *api.timetable.lock().unwrap() = timetable_fixture();
        Arc::new(api)
    }

    /// Make every request fail with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Delay financial reports for `days`.
    pub fn delay_report(&self, days: u32, delay: Duration) {
        self.report_delays.lock().unwrap().insert(days, delay);
    }

    /// Delay timetable requests filtered by `grade_level`.
    pub fn delay_timetable(&self, grade_level: GradeLevelId, delay: Duration) {
        self.timetable_delays.lock().unwrap().insert(grade_level, delay);
    }

    /// Fail timetable requests filtered by `grade_level` with a network error.
    pub fn fail_timetable_for(&self, grade_level: GradeLevelId) {
        self.unreachable_grades.lock().unwrap().push(grade_level);
    }

    /// Reject the grade submitted for `student` with a 422.
    pub fn reject_grade_for(&self, student: StudentId) {
        *self.rejected_grade.lock().unwrap() = Some(student);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn entered(&self) -> Vec<EnterGradeDto> {
        self.entered.lock().unwrap().clone()
    }

    pub fn timetable_ids(&self) -> Vec<TimetableEntryId> {
        self.timetable.lock().unwrap().iter().map(|e| e.id).collect()
    }

    fn call(&self, name: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(name);
        if self.offline.load(Ordering::SeqCst) {
            Err(ClientError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SchoolApi for FakeApi {
    async fn dashboard_stats(&self, branch: Option<BranchId>) -> Result<DashboardStats, ClientError> {
        self.call(format!("dashboard_stats:{branch:?}"))?;
        Ok(DashboardStats {
            total_students: branch.map_or(500, |b| b.get() * 100),
            total_classes: 12,
            total_subjects: 9,
            avg_grade: 71.5,
        })
    }

    async fn financial_report(
        &self,
        days: u32,
        branch: Option<BranchId>,
    ) -> Result<FinancialReport, ClientError> {
        let delay = self.report_delays.lock().unwrap().get(&days).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.call(format!("financial_report:{days}:{branch:?}"))?;
        Ok(FinancialReport {
            total_revenue: f64::from(days) * 1000.0,
            total_expenses: 400.0,
            total_profit: f64::from(days) * 1000.0 - 400.0,
            revenue_by_date: Vec::new(),
        })
    }

    async fn grade_levels(&self) -> Result<Vec<GradeLevel>, ClientError> {
        self.call("grade_levels".to_string())?;
        Ok(vec![
            GradeLevel {
                id: GRADE_4,
                name: "Grade 4".to_string(),
                stream: Some("East".to_string()),
            },
            GradeLevel {
                id: GRADE_5,
                name: "Grade 5".to_string(),
                stream: None,
            },
        ])
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ClientError> {
        self.call("subjects".to_string())?;
        Ok(vec![Subject {
            id: SubjectId::new(9),
            name: "Mathematics".to_string(),
            code: Some("MAT".to_string()),
        }])
    }

    async fn assessments(&self) -> Result<Vec<Assessment>, ClientError> {
        self.call("assessments".to_string())?;
        Ok(vec![Assessment {
            id: AssessmentId::new(3),
            name: "CAT 1".to_string(),
            term_name: Some("Term 1".to_string()),
            max_marks: Some(50.0),
        }])
    }

    async fn students(&self, grade_level: GradeLevelId) -> Result<Vec<Student>, ClientError> {
        self.call(format!("students:{grade_level}"))?;
        let base = grade_level.get() * 100;
        Ok((1..=3)
            .map(|n| Student {
                id: StudentId::new(base + n),
                admission_number: format!("ADM-{}", base + n),
                first_name: format!("Student{n}"),
                last_name: format!("Grade{}", grade_level.get()),
                grade_level_id: Some(grade_level),
            })
            .collect())
    }

    async fn enter_grade(&self, grade: &EnterGradeDto) -> Result<GradeRecord, ClientError> {
        self.call(format!("enter_grade:{}", grade.student_id))?;
        if *self.rejected_grade.lock().unwrap() == Some(grade.student_id) {
            return Err(ClientError::http(422, "Marks exceed maximum"));
        }

        let mut entered = self.entered.lock().unwrap();
        entered.push(grade.clone());
        Ok(GradeRecord {
            id: entered.len() as i64,
            student_id: grade.student_id,
            subject_id: grade.subject_id,
            assessment_id: grade.assessment_id,
            marks_obtained: grade.marks_obtained,
            remarks: Some(grade.remarks.clone()).filter(|r| !r.is_empty()),
        })
    }

    async fn timetable(
        &self,
        grade_level: Option<GradeLevelId>,
        teacher: Option<UserId>,
    ) -> Result<Vec<TimetableEntry>, ClientError> {
        let delay = grade_level.and_then(|g| self.timetable_delays.lock().unwrap().get(&g).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.call(format!("timetable:{grade_level:?}:{teacher:?}"))?;
        if grade_level.is_some_and(|g| self.unreachable_grades.lock().unwrap().contains(&g)) {
            return Err(ClientError::Network("connection reset".to_string()));
        }
        Ok(self
            .timetable
            .lock()
            .unwrap()
            .iter()
            .filter(|e| grade_level.is_none_or(|g| e.grade_level_id == g))
            .filter(|e| teacher.is_none_or(|t| e.teacher_id == Some(t)))
            .cloned()
            .collect())
    }

    async fn my_timetable(&self) -> Result<Vec<TimetableEntry>, ClientError> {
        self.call("my_timetable".to_string())?;
        Ok(self
            .timetable
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.teacher_id == Some(TEACHER_ID))
            .cloned()
            .collect())
    }

    async fn delete_timetable_entry(&self, id: TimetableEntryId) -> Result<(), ClientError> {
        self.call(format!("delete_timetable_entry:{id}"))?;
        let mut entries = self.timetable.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(ClientError::http(404, "Timetable entry not found"));
        }
        Ok(())
    }
}

#[allow(dead_code)]
pub fn lesson(
    id: i64,
    grade_level: GradeLevelId,
    grade_level_name: Option<&str>,
    teacher: UserId,
    day: DayOfWeek,
    start: (u32, u32),
) -> TimetableEntry {
    let start_time = NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap();
    TimetableEntry {
        id: TimetableEntryId::new(id),
        grade_level_id: grade_level,
        grade_level_name: grade_level_name.map(str::to_string),
        subject_id: SubjectId::new(9),
        subject_name: Some("Mathematics".to_string()),
        teacher_id: Some(teacher),
        teacher_name: None,
        day_of_week: day,
        start_time,
        end_time: start_time + chrono::Duration::minutes(40),
        room: None,
    }
}

/// Grade 4 and Grade 5 lessons; Grade 5 lessons with `TEACHER_ID` have no
/// class name.
#[allow(dead_code)]
pub fn timetable_fixture() -> Vec<TimetableEntry> {
    vec![
        lesson(1, GRADE_4, Some("Grade 4"), TEACHER_ID, DayOfWeek::Monday, (10, 0)),
        lesson(2, GRADE_4, Some("Grade 4"), TEACHER_ID, DayOfWeek::Monday, (8, 0)),
        lesson(3, GRADE_5, None, TEACHER_ID, DayOfWeek::Tuesday, (9, 0)),
        lesson(4, GRADE_4, Some("Grade 4"), OTHER_TEACHER_ID, DayOfWeek::Monday, (11, 0)),
        lesson(5, GRADE_4, Some("Grade 4"), TEACHER_ID, DayOfWeek::Wednesday, (8, 0)),
    ]
}

#[allow(dead_code)]
pub fn session(role: Role, branch: Option<i64>) -> SessionUser {
    SessionUser::new(TEACHER_ID, role, branch.map(BranchId::new), "Amina Otieno")
}

#[allow(dead_code)]
pub fn memory_cache() -> SnapshotCache<SharedStore> {
    let store: SharedStore = Arc::new(MemoryStore::new());
    SnapshotCache::new(store, "test")
}

/// Application state over `api` with the standard policy.
#[allow(dead_code)]
pub fn app_state(
    api: Arc<FakeApi>,
    cache: SnapshotCache<SharedStore>,
    session: Option<SessionUser>,
) -> AppState {
    AppState::new(api, Arc::new(StaticAuthorizer::standard()), cache, session)
}
