//! Redis snapshot store for clients sharing one cache.
//!
//! Snapshots carry no expiry, so values are written with plain `SET`.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, instrument};

use crate::error::CacheError;
use crate::store::SnapshotStore;

/// Redis-backed [`SnapshotStore`] with a managed, reconnecting connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Redis` if the connection fails.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl SnapshotStore for RedisStore {
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        debug!(cache.key = %key, cache.hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    async fn save(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        debug!(cache.key = %key, "Redis SET");
        Ok(())
    }
}
