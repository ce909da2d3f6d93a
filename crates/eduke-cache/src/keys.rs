//! Snapshot key generation.
//!
//! There is one snapshot per view and set of query parameters actually
//! fetched. Keys here are unprefixed; [`SnapshotCache`](crate::SnapshotCache)
//! adds the configured prefix.

use eduke_models::{BranchId, GradeLevelId, UserId};
use sha2::{Digest, Sha256};

/// Builds a key from its parts.
fn build_key(parts: &[&str]) -> String {
    parts.join(":")
}

/// Joins a prefix and a key the way every store expects.
pub fn prefixed(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}:{}", prefix, key)
    }
}

/// Short, stable digest of query parameters.
///
/// Snapshots outlive the process, so this must not depend on a per-process
/// hasher seed.
pub fn hash_params(params: &[(&str, Option<String>)]) -> String {
    let mut hasher = Sha256::new();
    for (name, value) in params {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        match value {
            Some(v) => hasher.update(v.as_bytes()),
            None => hasher.update(b"\0"),
        }
        hasher.update(b"&");
    }
    hex::encode(&hasher.finalize()[..8])
}

fn branch_part(branch: Option<BranchId>) -> String {
    branch.map_or_else(|| "all".to_string(), |b| b.to_string())
}

/// Keys for dashboard aggregates.
pub mod dashboard {
    use super::*;

    /// Statistics for one branch filter.
    pub fn stats(branch: Option<BranchId>) -> String {
        build_key(&["dashboard", "stats", &branch_part(branch)])
    }

    /// Financial report for one window and branch filter.
    pub fn report(days: u32, branch: Option<BranchId>) -> String {
        build_key(&["dashboard", "report", &days.to_string(), &branch_part(branch)])
    }
}

/// Keys for user preferences.
pub mod preferences {
    use super::*;

    /// Last chosen dashboard date range.
    pub fn date_range() -> String {
        build_key(&["dashboard-date-range"])
    }
}

/// Keys for academic reference data.
pub mod academics {
    use super::*;

    pub fn grade_levels() -> String {
        build_key(&["academics", "grade-levels"])
    }

    pub fn subjects() -> String {
        build_key(&["academics", "subjects"])
    }

    pub fn assessments() -> String {
        build_key(&["academics", "assessments"])
    }

    /// Student roster of one class.
    pub fn students(grade_level: GradeLevelId) -> String {
        build_key(&["academics", "students", &grade_level.to_string()])
    }
}

/// Keys for timetable views.
pub mod timetable {
    use super::*;

    /// Entries for a class filter and teacher filter.
    pub fn entries(grade_level: Option<GradeLevelId>, teacher: Option<UserId>) -> String {
        let digest = hash_params(&[
            ("grade_level_id", grade_level.map(|g| g.to_string())),
            ("teacher_id", teacher.map(|t| t.to_string())),
        ]);
        build_key(&["timetable", "entries", &digest])
    }

    /// The signed-in teacher's own timetable.
    pub fn mine(user: UserId) -> String {
        build_key(&["timetable", "mine", &user.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_keys_vary_by_params() {
        assert_eq!(dashboard::stats(None), "dashboard:stats:all");
        assert_eq!(dashboard::stats(Some(BranchId::new(3))), "dashboard:stats:3");
        assert_ne!(
            dashboard::report(30, None),
            dashboard::report(90, None)
        );
        assert_eq!(dashboard::report(1, Some(BranchId::new(2))), "dashboard:report:1:2");
    }

    #[test]
    fn test_hash_params_is_stable() {
        let a = hash_params(&[("grade_level_id", Some("4".into()))]);
        let b = hash_params(&[("grade_level_id", Some("4".into()))]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_hash_params_distinguishes_absent_from_empty() {
        let absent = hash_params(&[("teacher_id", None)]);
        let empty = hash_params(&[("teacher_id", Some(String::new()))]);
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_timetable_keys() {
        let all = timetable::entries(None, None);
        let grade = timetable::entries(Some(GradeLevelId::new(1)), None);
        let teacher = timetable::entries(None, Some(UserId::new(1)));
        assert_ne!(all, grade);
        assert_ne!(grade, teacher);
        assert!(all.starts_with("timetable:entries:"));
    }

    #[test]
    fn test_prefixed() {
        assert_eq!(prefixed("eduke", "a"), "eduke:a");
        assert_eq!(prefixed("", "a"), "a");
    }
}
