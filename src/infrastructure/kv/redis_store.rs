//! Redis-backed counter and mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::{CounterRecord, PutOutcome, UrlMapping};
use crate::domain::repositories::{CounterRepository, MappingRepository, StoreError};

/// Redis store implementing both repositories.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// The counter is a single integer key advanced with `INCR`; mappings are
/// string keys under a namespace prefix written with `SETNX`.
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
    counter_key: String,
    mapping_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `counter_key` - Key holding the counter value
    /// - `mapping_prefix` - Namespace for mapping keys (`<prefix>:<code>`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        counter_key: impl Into<String>,
        mapping_prefix: impl Into<String>,
    ) -> Result<Self, StoreError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            counter_key: counter_key.into(),
            mapping_prefix: mapping_prefix.into(),
        })
    }

    /// Constructs the full Redis key for a mapping.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}:{}", self.mapping_prefix, short_code)
    }
}

#[async_trait]
impl CounterRepository for RedisStore {
    async fn increment(&self) -> Result<CounterRecord, StoreError> {
        let mut conn = self.client.clone();
        let value: i64 = conn.incr(&self.counter_key, 1).await?;

        let value = u64::try_from(value)
            .map_err(|_| StoreError::backend(format!("negative counter value {}", value)))?;

        Ok(CounterRecord::new(self.counter_key.clone(), value))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.client.clone();
        conn.ping::<()>().await?;
        Ok(())
    }
}

#[async_trait]
impl MappingRepository for RedisStore {
    async fn put(&self, mapping: &UrlMapping) -> Result<PutOutcome, StoreError> {
        let key = self.build_key(&mapping.short_code);
        let mut conn = self.client.clone();

        let created: bool = conn.set_nx(&key, &mapping.long_url).await?;

        if created {
            debug!("SETNX {}", key);
            Ok(PutOutcome::Created)
        } else {
            debug!("SETNX {} skipped, key exists", key);
            Ok(PutOutcome::AlreadyExists)
        }
    }

    async fn get(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let long_url: Option<String> = conn.get(&key).await?;

        Ok(long_url.map(|url| UrlMapping::new(short_code, url)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.client.clone();
        conn.ping::<()>().await?;
        Ok(())
    }
}
