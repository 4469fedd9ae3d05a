//! # Redmask Engine
//!
//! Cache-backed tokenization engine. Detects sensitive values in log
//! attributes and bodies, replaces them with stable surrogate values and
//! records the original ↔ masked mapping in a key-value store so that every
//! instance, before and after restarts, produces the same output.
//!
//! ## Features
//!
//! - Redis or in-process (Moka) backends behind one async trait
//! - Get-or-create with deterministic fallback: losing the store costs
//!   caching, never consistency
//! - Per-unit error isolation: one failing field or match never aborts a batch
//! - Caller-driven cancellation and deadlines for every store call
//!
//! ## Example
//!
//! ```ignore
//! use redmask_engine::{CallContext, EngineConfig, MaskingEngine};
//! use redmask_engine::store::StoreConfig;
//!
//! let engine = MaskingEngine::start(EngineConfig {
//!     fields_to_mask: vec!["username".into()],
//!     patterns: redmask_core::default_patterns(),
//!     store: StoreConfig::builder().redis("localhost:6379").build(),
//! })
//! .await?;
//!
//! let ctx = CallContext::new();
//! let masked = engine.mask_body(&ctx, "login from 192.168.1.1").await;
//! engine.shutdown().await?;
//! ```

pub mod context;
pub mod error;
pub mod masking;
pub mod metrics;
pub mod record;
pub mod store;

// Re-exports
pub use context::CallContext;
pub use error::{StartupError, StoreError};
pub use masking::{EngineConfig, MaskingEngine};
pub use record::{BatchSummary, LogBatch, LogRecord, RecordOutcome};
pub use store::{KeyValueStore, MemoryStore, RedisStore, StoreConfig, TokenStore};

// Re-export redmask_core for consumers
pub use redmask_core;
