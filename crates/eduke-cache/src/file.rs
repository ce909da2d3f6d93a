//! Snapshot store persisted as a single JSON document on disk.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

use crate::error::CacheError;
use crate::store::SnapshotStore;

/// Durable store backed by one JSON object of `key -> value`.
///
/// The whole document is rewritten on every save, through a temporary file
/// renamed over the original so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store. A file that is not a valid
    /// snapshot document is logged and treated as empty; it is replaced on
    /// the next save.
    #[instrument(skip(path), fields(cache.path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entries: BTreeMap<String, String> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    error!(error = %e, "Snapshot file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(cache.entries = entries.len(), "Snapshot file opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(cache.operation = "SAVE"))]
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        // Lock is held across the write so concurrent saves land in order.
        self.persist(&entries).await?;
        debug!(cache.key = %key, "Snapshot written");
        Ok(())
    }
}
