//! Backing store selection and startup wiring.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{CounterRepository, MappingRepository, StoreError};
use crate::infrastructure::kv::{MemoryStore, RedisStore};
use crate::infrastructure::persistence::{PgCounterRepository, PgMappingRepository};

/// Repositories for the configured backend.
///
/// Counter and mapping may share one underlying store (Redis, memory) or one
/// connection pool (PostgreSQL).
#[derive(Clone)]
pub struct Stores {
    pub backend: StoreBackend,
    pub counter: Arc<dyn CounterRepository>,
    pub mappings: Arc<dyn MappingRepository>,
}

impl Stores {
    /// Builds in-memory stores, mainly for tests and local runs.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            backend: StoreBackend::Memory,
            counter: store.clone(),
            mappings: store,
        }
    }
}

/// Connects to the backend selected by `config.store_backend`.
///
/// For PostgreSQL this also applies the embedded migrations.
///
/// # Errors
///
/// Returns [`StoreError`] if the connection, a migration, or a table name
/// check fails.
pub async fn connect(config: &Config) -> Result<Stores, StoreError> {
    match config.store_backend {
        StoreBackend::Postgres => connect_postgres(config).await,
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| StoreError::backend("REDIS_URL is not configured"))?;

            let store = Arc::new(
                RedisStore::connect(url, &config.counter_store, &config.mapping_store).await?,
            );

            Ok(Stores {
                backend: StoreBackend::Redis,
                counter: store.clone(),
                mappings: store,
            })
        }
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Stores::memory(Arc::new(MemoryStore::new())))
        }
    }
}

async fn connect_postgres(config: &Config) -> Result<Stores, StoreError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::backend("DATABASE_URL is not configured"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(url)
        .await?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;
    info!("Migrations applied");

    let pool = Arc::new(pool);
    let counter =
        PgCounterRepository::new(pool.clone(), &config.counter_store, config.counter_id.clone())?;
    let mappings = PgMappingRepository::new(pool, &config.mapping_store)?;

    Ok(Stores {
        backend: StoreBackend::Postgres,
        counter: Arc::new(counter),
        mappings: Arc::new(mappings),
    })
}
