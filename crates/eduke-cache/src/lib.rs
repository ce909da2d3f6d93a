//! # Eduke Cache
//!
//! Snapshot persistence and offline fallback for the Eduke client views.
//!
//! This crate provides:
//! - The [`SnapshotStore`] key-value abstraction with memory, file, and Redis backends
//! - [`SnapshotCache`], typed JSON snapshots on top of a store
//! - Snapshot key generation
//! - [`ViewState`] and [`fetch_with_fallback`], the cache-then-revalidate contract
//! - Store configuration from environment variables
//!
//! # Example
//!
//! ```ignore
//! use eduke_cache::{CacheConfig, SnapshotCache, ViewState, fetch_with_fallback, keys, open_store};
//!
//! let config = CacheConfig::from_env()?;
//! let cache = SnapshotCache::with_config(open_store(&config).await?, &config);
//!
//! let mut state = ViewState::new();
//! let ticket = state.begin();
//! let key = keys::dashboard::stats(None);
//! let outcome = fetch_with_fallback(&cache, &key, api.dashboard_stats(None)).await;
//! state.resolve(ticket, outcome);
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod file;
pub mod keys;
pub mod redis;
pub mod snapshot;
pub mod store;

use std::sync::Arc;
use tracing::info;

pub use config::{CacheBackend, CacheConfig};
pub use error::CacheError;
pub use fallback::{FetchOutcome, Freshness, Ticket, ViewState, fetch_with_fallback, persist};
pub use file::FileStore;
pub use redis::RedisStore;
pub use snapshot::SnapshotCache;
pub use store::{MemoryStore, SnapshotStore};

/// Shared handle to whichever store the configuration selects.
pub type SharedStore = Arc<dyn SnapshotStore>;

/// Open the store selected by `config`.
pub async fn open_store(config: &CacheConfig) -> Result<SharedStore, CacheError> {
    let store: SharedStore = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryStore::new()),
        CacheBackend::File => Arc::new(FileStore::open(&config.path).await?),
        CacheBackend::Redis => Arc::new(RedisStore::connect(&config.redis_url).await?),
    };

    info!(backend = ?config.backend, "Snapshot store ready");

    Ok(store)
}
