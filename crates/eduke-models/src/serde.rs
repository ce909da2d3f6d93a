use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

const LESSON_TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Lesson times arrive as `HH:MM` or `HH:MM:SS`; they are written back as
/// `HH:MM:SS`.
pub mod lesson_time {
    use super::*;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(LESSON_TIME_FORMATS[0]).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_lesson_time(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid lesson time {s:?}, expected HH:MM[:SS]"))
        })
    }
}

pub fn parse_lesson_time(s: &str) -> Option<NaiveTime> {
    LESSON_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s.trim(), fmt).ok())
}

/// Treats `""` as absent, for optional text the API sends as empty strings.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}
