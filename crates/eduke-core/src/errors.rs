//! Error types shared by the Eduke client crates.

use crate::permissions::Permission;

/// A role tag that is not part of the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

/// Failure of a remote API call or a gated client action.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("session is not authenticated")]
    Unauthorized,

    #[error("missing permission: {0}")]
    Forbidden(Permission),

    #[error("API returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Precondition(String),
}

impl ClientError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Whether this failure came from talking to the API, as opposed to a
    /// local check. Only these trigger cached-snapshot fallback.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized
                | ClientError::Http { .. }
                | ClientError::Timeout
                | ClientError::Network(_)
                | ClientError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::http(503, "maintenance");
        assert_eq!(err.to_string(), "API returned 503: maintenance");

        let err = ClientError::Forbidden(Permission::EnterGrades);
        assert_eq!(err.to_string(), "missing permission: enter_grades");
    }

    #[test]
    fn test_network_failure_classification() {
        assert!(ClientError::Timeout.is_network_failure());
        assert!(ClientError::Network("refused".into()).is_network_failure());
        assert!(ClientError::http(500, "boom").is_network_failure());
        assert!(!ClientError::Forbidden(Permission::ManagePos).is_network_failure());
        assert!(!ClientError::Validation("marks".into()).is_network_failure());
    }
}
