//! Remote API configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.eduke.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where and how to reach the school API.
///
/// # Environment Variables
///
/// - `EDUKE_API_URL`: base URL (default: `https://api.eduke.com`)
/// - `EDUKE_API_TIMEOUT_SECS`: per-request timeout (default: `15`)
/// - `EDUKE_API_TOKEN`: bearer token of the current session (default: unset)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Unparseable values fall back
    /// to their defaults.
    #[must_use]
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: var("EDUKE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            timeout_secs: var("EDUKE_API_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            token: var("EDUKE_API_TOKEN").filter(|t| !t.is_empty()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}
