//! # Eduke Models
//!
//! Data structures exchanged with the school API and shared by the client
//! views.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed integer IDs
//! - [`session`]: the signed-in user
//! - [`dashboard`]: dashboard statistics, financial reports, and date ranges
//! - [`academics`]: grade levels, subjects, assessments, students, and grade entries
//! - [`timetable`]: weekly timetable entries

pub mod academics;
pub mod dashboard;
pub mod ids;
pub mod serde;
pub mod session;
pub mod timetable;

// Re-export commonly used types at crate root for convenience
pub use academics::{Assessment, EnterGradeDto, GradeLevel, GradeRecord, Student, Subject};
pub use dashboard::{DashboardStats, DateRange, FinancialReport, RevenuePoint};
pub use ids::{
    AssessmentId, BranchId, GradeLevelId, StudentId, SubjectId, TimetableEntryId, UserId,
};
pub use session::{SessionUser, role_of};
pub use timetable::{DayOfWeek, TimetableEntry};
