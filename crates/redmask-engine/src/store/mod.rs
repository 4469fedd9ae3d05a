//! Cache-backed token store.
//!
//! The external key-value store is the consistency mechanism shared by every
//! engine instance, while deterministic synthesis guarantees that losing an
//! entry never changes the masked value. Backends:
//!
//! - [`RedisStore`]: shared Redis database, the production backend
//! - [`MemoryStore`]: in-process Moka cache with per-entry expiry

mod backend;
mod config;
pub mod keys;
mod memory;
mod redis;
mod token_store;

pub use backend::{KeyValueStore, open};
pub use config::{
    BackendConfig, DEFAULT_MEMORY_CAPACITY, DEFAULT_REDIS_ADDR, StoreConfig, StoreConfigBuilder,
};
pub use keys::StoreKey;
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use token_store::TokenStore;
