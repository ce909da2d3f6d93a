//! Academic reference data and gradebook entries.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{AssessmentId, GradeLevelId, StudentId, SubjectId};
use crate::serde::deserialize_optional_text;

pub const DEFAULT_MAX_MARKS: f64 = 100.0;

/// A class, optionally split into streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeLevel {
    pub id: GradeLevelId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub stream: Option<String>,
}

impl GradeLevel {
    /// `"Grade 4 (East)"`, or just the name when there is no stream.
    pub fn display_name(&self) -> String {
        match &self.stream {
            Some(stream) => format!("{} ({})", self.name, stream),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub term_name: Option<String>,
    #[serde(default)]
    pub max_marks: Option<f64>,
}

impl Assessment {
    pub fn max_marks(&self) -> f64 {
        self.max_marks.unwrap_or(DEFAULT_MAX_MARKS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grade_level_id: Option<GradeLevelId>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for recording one student's mark on one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EnterGradeDto {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub assessment_id: AssessmentId,
    #[validate(range(min = 0.0, message = "Marks cannot be negative"))]
    pub marks_obtained: f64,
    #[validate(length(max = 500, message = "Remarks must not exceed 500 characters"))]
    pub remarks: String,
}

/// A stored grade as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub assessment_id: AssessmentId,
    pub marks_obtained: f64,
    #[serde(default)]
    pub remarks: Option<String>,
}
