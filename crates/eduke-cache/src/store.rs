//! The persisted key-value store behind view snapshots.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::CacheError;

/// Durable string key-value storage.
///
/// Values are serialized snapshots. Writes to the same key overwrite;
/// nothing is ever expired or deleted by the client.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the raw value stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

#[async_trait]
impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).save(key, value).await
    }
}

#[async_trait]
impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).save(key, value).await
    }
}

/// In-process store. Contents are lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
