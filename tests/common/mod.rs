#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use url_shortener_core::application::retry::RetryPolicy;
use url_shortener_core::application::services::{CounterClient, MappingClient, ShortenerService};
use url_shortener_core::domain::entities::{CounterRecord, PutOutcome, UrlMapping};
use url_shortener_core::domain::repositories::{CounterRepository, MappingRepository, StoreError};
use url_shortener_core::infrastructure::kv::MemoryStore;
use url_shortener_core::routes::app_router;
use url_shortener_core::state::AppState;
use url_shortener_core::utils::code_generator::CodeGenerator;

pub const CLIENT_IP: &str = "203.0.113.7";

/// Three attempts without delay, so failure paths stay fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::from_millis(3, 0)
}

pub fn create_service(
    counter: Arc<dyn CounterRepository>,
    mappings: Arc<dyn MappingRepository>,
) -> ShortenerService {
    ShortenerService::new(
        CounterClient::new(counter, fast_retry()),
        MappingClient::new(mappings, fast_retry()),
        CodeGenerator::default(),
        3,
    )
}

pub fn create_test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(Arc::new(create_service(store.clone(), store)))
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Store whose every call fails, counting the attempts made against it.
#[derive(Default)]
pub struct FailingStore {
    pub increments: AtomicU32,
    pub puts: AtomicU32,
    pub gets: AtomicU32,
}

impl FailingStore {
    pub fn increments(&self) -> u32 {
        self.increments.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> u32 {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> u32 {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterRepository for FailingStore {
    async fn increment(&self) -> Result<CounterRecord, StoreError> {
        self.increments.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("counter unavailable"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::backend("counter unavailable"))
    }
}

#[async_trait]
impl MappingRepository for FailingStore {
    async fn put(&self, _mapping: &UrlMapping) -> Result<PutOutcome, StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("mappings unavailable"))
    }

    async fn get(&self, _short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::backend("mappings unavailable"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::backend("mappings unavailable"))
    }
}
