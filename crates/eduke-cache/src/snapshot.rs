//! Typed JSON snapshots over a [`SnapshotStore`].

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, instrument};

use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::keys;
use crate::store::SnapshotStore;

/// Reads and writes last-known-good payloads by key.
#[derive(Debug, Clone)]
pub struct SnapshotCache<S> {
    store: S,
    key_prefix: String,
}

impl<S: SnapshotStore> SnapshotCache<S> {
    pub fn new(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn with_config(store: S, config: &CacheConfig) -> Self {
        Self::new(store, config.key_prefix.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gets the snapshot stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist, the store fails, or the
    /// stored value no longer parses as `T`.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = keys::prefixed(&self.key_prefix, key);

        match self.store.load(&full_key).await {
            Ok(Some(value)) => {
                debug!(cache.key = %full_key, "Snapshot hit");
                match serde_json::from_str(&value) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        error!(cache.key = %full_key, error = %e, "Failed to deserialize snapshot");
                        None
                    }
                }
            }
            Ok(None) => {
                debug!(cache.key = %full_key, "Snapshot miss");
                None
            }
            Err(e) => {
                error!(cache.key = %full_key, error = %e, "Snapshot store read error");
                None
            }
        }
    }

    /// Stores `value` as the snapshot for `key`, replacing the previous one.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub async fn put<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize + ?Sized,
    {
        let full_key = keys::prefixed(&self.key_prefix, key);
        let json = serde_json::to_string(value)?;
        self.store.save(&full_key, &json).await?;
        debug!(cache.key = %full_key, "Snapshot stored");
        Ok(())
    }
}
