//! Key-value store trait definition.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::config::{BackendConfig, StoreConfig};
use super::memory::MemoryStore;
use super::redis::RedisStore;
use crate::error::StoreError;

/// A key-value store holding forward and reverse mappings.
///
/// Implementations must be safe for concurrent use by many callers; the
/// engine shares one instance across all workers.
///
/// # Implementors
///
/// - `RedisStore` - Redis, shared between processes
/// - `MemoryStore` - Moka cache, local to one process
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a key.
    ///
    /// Returns `Ok(None)` when the key does not exist. Transport problems are
    /// errors and must never be reported as a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a key. `ttl = None` means the entry never expires.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Verifies that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the connection.
    ///
    /// The default implementation is a no-op for stores without one.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Returns the backend name, for logging.
    fn name(&self) -> &str;
}

/// Opens the backend described by the configuration.
///
/// Redis connections are established eagerly, so an unreachable server is
/// reported here as `StoreError::Connection`.
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match config.backend() {
        BackendConfig::Redis { addr, password, db } => {
            let store = RedisStore::connect(addr, password.as_deref(), *db).await?;
            Ok(Arc::new(store))
        }
        BackendConfig::Memory { max_capacity } => Ok(Arc::new(MemoryStore::new(*max_capacity))),
    }
}
