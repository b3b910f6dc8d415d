//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::identifier::checked_table_name;
use crate::domain::entities::{PutOutcome, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};

/// PostgreSQL repository for short code mappings.
///
/// Inserts use `ON CONFLICT DO NOTHING`, so an existing code is reported
/// rather than overwritten.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    insert_sql: String,
    select_sql: String,
    ping_sql: String,
}

impl PgMappingRepository {
    /// Creates a repository over `table`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if `table` is not a plain identifier.
    pub fn new(pool: Arc<PgPool>, table: &str) -> Result<Self, StoreError> {
        let table = checked_table_name(table)?;

        Ok(Self {
            pool,
            insert_sql: format!(
                "INSERT INTO {table} (short_code, long_url) VALUES ($1, $2) \
                 ON CONFLICT (short_code) DO NOTHING"
            ),
            select_sql: format!("SELECT short_code, long_url FROM {table} WHERE short_code = $1"),
            ping_sql: format!("SELECT 1 FROM {table} LIMIT 0"),
        })
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn put(&self, mapping: &UrlMapping) -> Result<PutOutcome, StoreError> {
        let result = sqlx::query(&self.insert_sql)
            .bind(&mapping.short_code)
            .bind(&mapping.long_url)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 1 {
            Ok(PutOutcome::Created)
        } else {
            Ok(PutOutcome::AlreadyExists)
        }
    }

    async fn get(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row: Option<(String, String)> = sqlx::query_as(&self.select_sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|(short_code, long_url)| UrlMapping::new(short_code, long_url)))
    }

    /// Fails if the mapping table is missing, not only if the server is down.
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(&self.ping_sql).execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
