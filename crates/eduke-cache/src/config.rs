//! Snapshot store configuration.
//!
//! This module provides configuration for where view snapshots are persisted,
//! loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CacheError;
use crate::keys;

/// Which [`SnapshotStore`](crate::SnapshotStore) backs the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// JSON document on local disk, durable across restarts.
    #[default]
    File,
    /// Process memory only.
    Memory,
    /// A Redis server shared by several clients.
    Redis,
}

impl FromStr for CacheBackend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(CacheBackend::File),
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(CacheError::Config(format!("unknown cache backend {other:?}"))),
        }
    }
}

/// Snapshot store configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `CACHE_BACKEND`: `file`, `memory`, or `redis` (default: `file`)
/// - `CACHE_PATH`: snapshot file for the `file` backend (default: `storage/snapshots.json`)
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: Prefix for all snapshot keys (default: `eduke`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    pub path: PathBuf,

    /// Redis connection URL.
    pub redis_url: String,

    /// Prefix for all keys to avoid collisions with other users of the store.
    pub key_prefix: String,
}

impl CacheConfig {
    /// Load configuration from environment variables.
    ///
    /// An unrecognised `CACHE_BACKEND` is an error rather than a silent
    /// fallback, so a misconfigured Redis deployment is noticed.
    pub fn from_env() -> Result<Self, CacheError> {
        let defaults = Self::default();
        Ok(Self {
            backend: match env::var("CACHE_BACKEND") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.backend,
            },
            path: env::var("CACHE_PATH").map(PathBuf::from).unwrap_or(defaults.path),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or(defaults.key_prefix),
        })
    }

    /// Build a prefixed key.
    ///
    /// # Example
    ///
    /// ```
    /// use eduke_cache::CacheConfig;
    ///
    /// let config = CacheConfig::default();
    /// assert_eq!(config.prefixed_key("dashboard-date-range"), "eduke:dashboard-date-range");
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        keys::prefixed(&self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::File,
            path: PathBuf::from("storage/snapshots.json"),
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "eduke".into(),
        }
    }
}
