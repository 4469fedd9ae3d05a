//! In-process backend using Moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use super::backend::KeyValueStore;
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    ttl: Option<Duration>,
}

/// Expira cada entry segun su propio TTL.
struct EntryExpiry;

impl Expiry<String, MemoryEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &MemoryEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &MemoryEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Key-value store backed by a Moka cache.
///
/// Thread-safe and async-friendly, but local to the process: two processes
/// using it do not share mappings. Clones share the same cache.
///
/// # Examples
///
/// ```
/// use redmask_engine::store::{KeyValueStore, MemoryStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new(1_000);
/// store.set("mask:ipv4:10.0.0.1", "10.1.2.3", None).await.unwrap();
///
/// assert_eq!(
///     store.get("mask:ipv4:10.0.0.1").await.unwrap().as_deref(),
///     Some("10.1.2.3")
/// );
/// # }
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    inner: Cache<String, MemoryEntry>,
}

impl MemoryStore {
    /// Creates a store holding at most `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { inner }
    }

    /// Returns the approximate number of entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Removes a key, simulating an eviction.
    pub async fn evict(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Forces pending maintenance (expirations, counters).
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        self.inner
            .insert(
                key.to_string(),
                MemoryEntry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
