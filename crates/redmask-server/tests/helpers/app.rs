//! Routers backed by test stores.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use redmask_engine::redmask_core::{DigestSynthesizer, PatternSet, default_patterns};
use redmask_engine::{KeyValueStore, MaskingEngine, MemoryStore, StoreError, TokenStore};
use redmask_server::{AppState, create_router_with_state, metrics::build_handle};

use super::client::TestClient;

/// Store whose ping and reads always fail.
pub struct DownStore;

#[async_trait]
impl KeyValueStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::transport("down", "get", "connection refused"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        Err(StoreError::transport("down", "set", "connection refused"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::transport("down", "ping", "connection refused"))
    }

    fn name(&self) -> &str {
        "down"
    }
}

/// Engine over an arbitrary backend with the default patterns.
pub fn engine_with(backend: Arc<dyn KeyValueStore>, fields: &[&str]) -> MaskingEngine {
    let patterns = PatternSet::compile(&default_patterns()).expect("default patterns");
    let synth = Arc::new(DigestSynthesizer::from_patterns(&patterns));
    let store = TokenStore::new(backend, synth, None);

    MaskingEngine::new(fields.iter().copied(), patterns, store)
}

/// Router over an arbitrary engine.
pub fn router_for(engine: MaskingEngine) -> Router {
    let state = AppState::new(engine, Duration::from_secs(5));
    create_router_with_state(state, build_handle().expect("prometheus handle"))
}

/// Client over a fresh in-memory store masking `username` and `email`.
pub fn client() -> TestClient {
    memory_client(Arc::new(MemoryStore::new(1_000)))
}

/// Client over the given in-memory store.
pub fn memory_client(store: Arc<MemoryStore>) -> TestClient {
    TestClient::new(router_for(engine_with(store, &["username", "email"])))
}

/// Client whose store is unreachable.
pub fn down_client() -> TestClient {
    TestClient::new(router_for(engine_with(Arc::new(DownStore), &["username"])))
}
