//! PostgreSQL implementation of the counter repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::identifier::checked_table_name;
use crate::domain::entities::CounterRecord;
use crate::domain::repositories::{CounterRepository, StoreError};

/// PostgreSQL counter stored as one row of a counters table.
///
/// The increment is a single upsert statement, so concurrent callers are
/// serialised by the row lock and each observes a distinct value.
pub struct PgCounterRepository {
    pool: Arc<PgPool>,
    counter_id: String,
    increment_sql: String,
    ping_sql: String,
}

impl PgCounterRepository {
    /// Creates a repository for the counter row `counter_id` in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if `table` is not a plain identifier.
    pub fn new(
        pool: Arc<PgPool>,
        table: &str,
        counter_id: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let table = checked_table_name(table)?;

        let increment_sql = format!(
            "INSERT INTO {table} (id, value) VALUES ($1, 1) \
             ON CONFLICT (id) DO UPDATE SET value = {table}.value + 1 \
             RETURNING value"
        );

        Ok(Self {
            pool,
            counter_id: counter_id.into(),
            increment_sql,
            ping_sql: format!("SELECT 1 FROM {table} LIMIT 0"),
        })
    }
}

#[async_trait]
impl CounterRepository for PgCounterRepository {
    async fn increment(&self) -> Result<CounterRecord, StoreError> {
        let value: i64 = sqlx::query_scalar(&self.increment_sql)
            .bind(&self.counter_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        let value = u64::try_from(value)
            .map_err(|_| StoreError::backend(format!("negative counter value {}", value)))?;

        Ok(CounterRecord::new(self.counter_id.clone(), value))
    }

    /// Fails if the counter table is missing, not only if the server is down.
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(&self.ping_sql).execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queries_target_configured_table() {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let repo = PgCounterRepository::new(Arc::new(pool), "custom_counters", "counter").unwrap();

        assert!(repo.increment_sql.starts_with("INSERT INTO custom_counters "));
        assert_eq!(repo.ping_sql, "SELECT 1 FROM custom_counters LIMIT 0");
    }
}
