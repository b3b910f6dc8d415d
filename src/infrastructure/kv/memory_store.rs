//! Process-local store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::{CounterRecord, DEFAULT_COUNTER_ID, PutOutcome, UrlMapping};
use crate::domain::repositories::{CounterRepository, MappingRepository, StoreError};

/// In-memory store implementing both repositories.
///
/// State lives only as long as the process, so this backend is only
/// meaningful for a single instance. Clustered deployments need a shared store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    counter: AtomicU64,
    mappings: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(short_code, long_url)` pairs.
    pub fn with_mappings<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mappings = mappings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            counter: AtomicU64::new(0),
            mappings: RwLock::new(mappings),
        }
    }

    /// Current counter value without incrementing it.
    pub fn counter_value(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.mappings.read().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend("memory store lock poisoned")
}

#[async_trait]
impl CounterRepository for MemoryStore {
    async fn increment(&self) -> Result<CounterRecord, StoreError> {
        let value = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CounterRecord::new(DEFAULT_COUNTER_ID, value))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl MappingRepository for MemoryStore {
    async fn put(&self, mapping: &UrlMapping) -> Result<PutOutcome, StoreError> {
        let mut mappings = self.mappings.write().map_err(poisoned)?;

        match mappings.entry(mapping.short_code.clone()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(mapping.long_url.clone());
                Ok(PutOutcome::Created)
            }
        }
    }

    async fn get(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let mappings = self.mappings.read().map_err(poisoned)?;

        Ok(mappings
            .get(short_code)
            .map(|long_url| UrlMapping::new(short_code, long_url.clone())))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_increment_starts_at_one() {
        let store = MemoryStore::new();

        assert_eq!(store.increment().await.unwrap().value, 1);
        assert_eq!(store.increment().await.unwrap().value, 2);
        assert_eq!(store.counter_value(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_distinct() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment().await.unwrap().value })
            })
            .collect();

        let mut values = HashSet::new();
        for handle in handles {
            assert!(values.insert(handle.await.unwrap()));
        }

        assert_eq!(values.len(), 200);
        assert_eq!(store.counter_value(), 200);
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let store = MemoryStore::new();
        let first = UrlMapping::new("abc12345", "https://example.com");
        let second = UrlMapping::new("abc12345", "https://attacker.example");

        assert_eq!(store.put(&first).await.unwrap(), PutOutcome::Created);
        assert_eq!(store.put(&second).await.unwrap(), PutOutcome::AlreadyExists);

        let stored = store.get("abc12345").await.unwrap().unwrap();
        assert_eq!(stored.long_url, "https://example.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_with_mappings() {
        let store = MemoryStore::with_mappings([("abc12345", "https://example.com")]);

        let found = store.get("abc12345").await.unwrap();
        assert_eq!(found, Some(UrlMapping::new("abc12345", "https://example.com")));
        assert!(store.get("zzzz0000").await.unwrap().is_none());
    }
}
