//! Session identity supplied through the environment.
//!
//! The browser front end receives the session from the login flow; the
//! headless client reads the same fields from the environment instead.

use eduke_core::{Role, UnknownRole};
use std::env;

/// Identity of the signed-in user.
///
/// # Environment Variables
///
/// - `EDUKE_SESSION_ROLE`: one of `superadmin`, `parent_org_admin`, `branch_admin`, `staff` (required)
/// - `EDUKE_SESSION_USER_ID`: numeric user id (default: `0`)
/// - `EDUKE_SESSION_BRANCH_ID`: numeric branch id (default: unset)
/// - `EDUKE_SESSION_NAME`: display name (default: empty)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub role: Role,
    pub user_id: i64,
    pub branch_id: Option<i64>,
    pub full_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("EDUKE_SESSION_ROLE is not set")]
    MissingRole,

    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),

    #[error("{name} must be an integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, SessionConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, SessionConfigError> {
        let role = var("EDUKE_SESSION_ROLE")
            .filter(|r| !r.trim().is_empty())
            .ok_or(SessionConfigError::MissingRole)?
            .trim()
            .parse::<Role>()?;

        let number = |name: &'static str| -> Result<Option<i64>, SessionConfigError> {
            match var(name).filter(|v| !v.trim().is_empty()) {
                Some(value) => value
                    .trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| SessionConfigError::InvalidNumber { name, value }),
                None => Ok(None),
            }
        };

        Ok(Self {
            role,
            user_id: number("EDUKE_SESSION_USER_ID")?.unwrap_or(0),
            branch_id: number("EDUKE_SESSION_BRANCH_ID")?,
            full_name: var("EDUKE_SESSION_NAME").unwrap_or_default(),
        })
    }
}
