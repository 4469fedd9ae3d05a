//! Token store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Redis address.
pub const DEFAULT_REDIS_ADDR: &str = "localhost:6379";

/// Default capacity of the in-memory backend.
pub const DEFAULT_MEMORY_CAPACITY: u64 = 100_000;

/// Which key-value backend to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Redis server.
    Redis {
        /// host:port of the server.
        addr: String,
        /// Password, if the server requires one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        /// Logical database index.
        #[serde(default)]
        db: i64,
    },
    /// In-process cache; not shared between processes.
    Memory {
        /// Maximum number of entries.
        max_capacity: u64,
    },
}

impl BackendConfig {
    /// Address used in logs and errors; never includes the password.
    pub fn address(&self) -> &str {
        match self {
            Self::Redis { addr, .. } => addr,
            Self::Memory { .. } => "in-process",
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Redis {
            addr: DEFAULT_REDIS_ADDR.to_string(),
            password: None,
            db: 0,
        }
    }
}

/// Configuration for the token store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend selection and connection parameters.
    #[serde(default)]
    backend: BackendConfig,

    /// TTL of forward and reverse entries, in seconds. 0 = no expiration.
    #[serde(default)]
    token_ttl: u64,
}

impl StoreConfig {
    /// Creates a new builder for StoreConfig.
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Returns the backend configuration.
    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Returns the TTL in seconds.
    pub fn token_ttl(&self) -> u64 {
        self.token_ttl
    }

    /// Returns the entry expiry; `None` when entries never expire.
    pub fn expiry(&self) -> Option<Duration> {
        (self.token_ttl > 0).then(|| Duration::from_secs(self.token_ttl))
    }
}

/// Builder for StoreConfig.
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    backend: Option<BackendConfig>,
    token_ttl: u64,
}

impl StoreConfigBuilder {
    /// Uses a Redis backend at the given address.
    pub fn redis(mut self, addr: impl Into<String>) -> Self {
        self.backend = Some(BackendConfig::Redis {
            addr: addr.into(),
            password: None,
            db: 0,
        });
        self
    }

    /// Sets the Redis password. Ignored for other backends.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        if let Some(BackendConfig::Redis { password: slot, .. }) = &mut self.backend {
            *slot = Some(password.into());
        }
        self
    }

    /// Sets the Redis database index. Ignored for other backends.
    pub fn db(mut self, db: i64) -> Self {
        if let Some(BackendConfig::Redis { db: slot, .. }) = &mut self.backend {
            *slot = db;
        }
        self
    }

    /// Uses an in-memory backend with the given capacity.
    pub fn memory(mut self, max_capacity: u64) -> Self {
        self.backend = Some(BackendConfig::Memory { max_capacity });
        self
    }

    /// Sets the entry TTL in seconds. 0 disables expiration.
    pub fn token_ttl(mut self, seconds: u64) -> Self {
        self.token_ttl = seconds;
        self
    }

    /// Builds the configuration. Defaults to Redis on localhost.
    pub fn build(self) -> StoreConfig {
        StoreConfig {
            backend: self.backend.unwrap_or_default(),
            token_ttl: self.token_ttl,
        }
    }
}
