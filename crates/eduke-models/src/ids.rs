//! Strongly-typed ID newtypes for domain entities.
//!
//! The API identifies rows by integer keys. Wrapping them keeps a
//! `BranchId` from being passed where a `GradeLevelId` is expected.
//!
//! # Example
//!
//! ```
//! use eduke_models::ids::{BranchId, UserId};
//!
//! let branch = BranchId::new(3);
//! assert_eq!(branch.get(), 3);
//! assert_eq!(branch.to_string(), "3");
//! // let user: UserId = branch; // Compile error! Type mismatch.
//! # let _ = UserId::new(1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed integer ID newtype.
///
/// Serializes transparently as the bare integer.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for users (teachers, office staff, admins).
    UserId
);

define_id!(
    /// Strongly-typed ID for branches (campuses) of a tenant.
    BranchId
);

define_id!(
    /// Strongly-typed ID for grade levels (classes).
    GradeLevelId
);

define_id!(
    /// Strongly-typed ID for subjects.
    SubjectId
);

define_id!(
    /// Strongly-typed ID for assessments.
    AssessmentId
);

define_id!(
    /// Strongly-typed ID for students.
    StudentId
);

define_id!(
    /// Strongly-typed ID for timetable entries.
    TimetableEntryId
);
