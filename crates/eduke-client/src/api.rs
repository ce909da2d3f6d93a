//! The remote operations the client views depend on.

use async_trait::async_trait;
use eduke_core::ClientError;
use eduke_models::{
    Assessment, BranchId, DashboardStats, EnterGradeDto, FinancialReport, GradeLevel,
    GradeLevelId, GradeRecord, Student, Subject, TimetableEntry, TimetableEntryId, UserId,
};

/// School API as seen by the client.
///
/// Branch and date filters are optional; the server applies the same role
/// rules the client gates on.
#[async_trait]
pub trait SchoolApi: Send + Sync {
    async fn dashboard_stats(&self, branch: Option<BranchId>) -> Result<DashboardStats, ClientError>;

    async fn financial_report(
        &self,
        days: u32,
        branch: Option<BranchId>,
    ) -> Result<FinancialReport, ClientError>;

    async fn grade_levels(&self) -> Result<Vec<GradeLevel>, ClientError>;

    async fn subjects(&self) -> Result<Vec<Subject>, ClientError>;

    async fn assessments(&self) -> Result<Vec<Assessment>, ClientError>;

    async fn students(&self, grade_level: GradeLevelId) -> Result<Vec<Student>, ClientError>;

    async fn enter_grade(&self, grade: &EnterGradeDto) -> Result<GradeRecord, ClientError>;

    async fn timetable(
        &self,
        grade_level: Option<GradeLevelId>,
        teacher: Option<UserId>,
    ) -> Result<Vec<TimetableEntry>, ClientError>;

    /// Timetable of the signed-in teacher.
    async fn my_timetable(&self) -> Result<Vec<TimetableEntry>, ClientError>;

    async fn delete_timetable_entry(&self, id: TimetableEntryId) -> Result<(), ClientError>;
}

#[async_trait]
impl<A: SchoolApi + ?Sized> SchoolApi for std::sync::Arc<A> {
    async fn dashboard_stats(&self, branch: Option<BranchId>) -> Result<DashboardStats, ClientError> {
        (**self).dashboard_stats(branch).await
    }

    async fn financial_report(
        &self,
        days: u32,
        branch: Option<BranchId>,
    ) -> Result<FinancialReport, ClientError> {
        (**self).financial_report(days, branch).await
    }

    async fn grade_levels(&self) -> Result<Vec<GradeLevel>, ClientError> {
        (**self).grade_levels().await
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ClientError> {
        (**self).subjects().await
    }

    async fn assessments(&self) -> Result<Vec<Assessment>, ClientError> {
        (**self).assessments().await
    }

    async fn students(&self, grade_level: GradeLevelId) -> Result<Vec<Student>, ClientError> {
        (**self).students(grade_level).await
    }

    async fn enter_grade(&self, grade: &EnterGradeDto) -> Result<GradeRecord, ClientError> {
        (**self).enter_grade(grade).await
    }

    async fn timetable(
        &self,
        grade_level: Option<GradeLevelId>,
        teacher: Option<UserId>,
    ) -> Result<Vec<TimetableEntry>, ClientError> {
        (**self).timetable(grade_level, teacher).await
    }

    async fn my_timetable(&self) -> Result<Vec<TimetableEntry>, ClientError> {
        (**self).my_timetable().await
    }

    async fn delete_timetable_entry(&self, id: TimetableEntryId) -> Result<(), ClientError> {
        (**self).delete_timetable_entry(id).await
    }
}
