#![allow(dead_code)]
//! Shared fixtures for engine integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redmask_engine::redmask_core::{
    Category, DigestSynthesizer, PatternConfig, PatternSet, Synthesize, default_patterns,
};
use redmask_engine::{KeyValueStore, MaskingEngine, MemoryStore, StoreError, TokenStore};

/// Store that fails every operation whose key mentions `poison`.
pub struct PoisonedStore {
    pub inner: MemoryStore,
    pub poison: String,
}

impl PoisonedStore {
    pub fn new(poison: impl Into<String>) -> Self {
        Self {
            inner: MemoryStore::new(1_000),
            poison: poison.into(),
        }
    }
}

#[async_trait]
impl KeyValueStore for PoisonedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if key.contains(&self.poison) {
            return Err(StoreError::transport("poisoned", "get", "simulated outage"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        self.inner.set(key, value, ttl).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "poisoned"
    }
}

/// Store that never retains anything: reads miss, writes fail.
pub struct UnavailableStore {
    pub writes: AtomicU32,
}

impl UnavailableStore {
    pub fn new() -> Self {
        Self {
            writes: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::transport("unavailable", "set", "read-only replica"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Store with a configurable health check that records `close()` calls.
pub struct ClosableStore {
    pub healthy: bool,
    pub closed: AtomicBool,
}

impl ClosableStore {
    pub fn new(healthy: bool) -> Self {
        Self {
            healthy,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for ClosableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.healthy {
            Ok(())
        } else {
            Err(StoreError::transport("closable", "ping", "NOAUTH"))
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "closable"
    }
}

/// Synthesizer that must never be reached.
pub struct PanickingSynthesizer;

impl Synthesize for PanickingSynthesizer {
    fn synthesize(&self, _original: &str, category: &Category) -> String {
        panic!("synthesis attempted for category {category}");
    }
}

pub fn default_set() -> PatternSet {
    PatternSet::compile(&default_patterns()).expect("default patterns must compile")
}

pub fn default_synth() -> DigestSynthesizer {
    DigestSynthesizer::from_patterns(&default_set())
}

/// Token store over the given backend, using the default synthesizer.
pub fn token_store(backend: Arc<dyn KeyValueStore>, ttl: Option<Duration>) -> TokenStore {
    TokenStore::new(backend, Arc::new(default_synth()), ttl)
}

/// Engine over the given backend.
pub fn engine(
    backend: Arc<dyn KeyValueStore>,
    fields: &[&str],
    patterns: &[PatternConfig],
) -> MaskingEngine {
    let patterns = PatternSet::compile(patterns).expect("test patterns must compile");
    let synth = Arc::new(DigestSynthesizer::from_patterns(&patterns));
    let store = TokenStore::new(backend, synth, None);

    MaskingEngine::new(fields.iter().copied(), patterns, store)
}
