//! Timetable entries.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ids::{GradeLevelId, SubjectId, TimetableEntryId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Display order of the weekly grid.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        use chrono::Weekday;
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One lesson block in the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: TimetableEntryId,
    pub grade_level_id: GradeLevelId,
    #[serde(default)]
    pub grade_level_name: Option<String>,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<UserId>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    pub day_of_week: DayOfWeek,
    #[serde(with = "crate::serde::lesson_time")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::serde::lesson_time")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub room: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_parses_short_times() {
        let json = r#"{
            "id": 5,
            "grade_level_id": 2,
            "grade_level_name": "Grade 2",
            "subject_id": 9,
            "subject_name": "Mathematics",
            "teacher_id": 14,
            "day_of_week": "Tuesday",
            "start_time": "08:00",
            "end_time": "08:40:00",
            "room": "Lab 1"
        }"#;
        let entry: TimetableEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(entry.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(entry.teacher_id, Some(UserId::new(14)));

        let written = serde_json::to_string(&entry).unwrap();
        assert!(written.contains(r#""start_time":"08:00:00""#));
    }

    #[test]
    fn test_weekday_conversion() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }
}
