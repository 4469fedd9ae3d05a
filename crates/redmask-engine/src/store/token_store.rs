//! Get-or-create mapping of original values to masked values.

use std::sync::Arc;
use std::time::{Duration, Instant};

use redmask_core::{Category, Synthesize};
use tracing::{debug, trace, warn};

use super::backend::KeyValueStore;
use super::keys::StoreKey;
use crate::context::CallContext;
use crate::error::StoreError;
use crate::metrics::StoreMetrics;

/// Cache-backed token store.
///
/// The store is consulted first so that every engine instance agrees on the
/// value already recorded for an input. On a clean miss the value is
/// synthesized and written back; because synthesis is deterministic, a lost
/// write or a racing writer can only produce the same value again.
///
/// Cheap to clone; clones share the backend and metrics.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
    synthesizer: Arc<dyn Synthesize>,
    ttl: Option<Duration>,
    metrics: StoreMetrics,
}

impl TokenStore {
    /// Creates a token store. `ttl = None` writes entries without expiry.
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        synthesizer: Arc<dyn Synthesize>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            backend,
            synthesizer,
            ttl,
            metrics: StoreMetrics::new(),
        }
    }

    /// Returns the masked value for `original` in `category`, creating the
    /// mapping on first encounter.
    ///
    /// # Errors
    ///
    /// Fails only when the initial read fails for a reason other than a
    /// missing key, or when the caller cancels it. Write failures are logged
    /// and the synthesized value is still returned.
    pub async fn get_or_create(
        &self,
        ctx: &CallContext,
        original: &str,
        category: &Category,
    ) -> Result<String, StoreError> {
        let forward_key = StoreKey::forward(category, original).to_string();

        let start = Instant::now();
        let cached = ctx.run("get", self.backend.get(&forward_key)).await;
        self.metrics.record_operation_duration("get", start.elapsed());

        match cached {
            Ok(Some(masked)) => {
                self.metrics.record_hit();
                trace!(category = %category, "Store hit");
                return Ok(masked);
            }
            Ok(None) => self.metrics.record_miss(),
            Err(e) => {
                self.metrics.record_read_error();
                return Err(e);
            }
        }

        let masked = self.synthesizer.synthesize(original, category);

        let start = Instant::now();
        if let Err(e) = ctx
            .run("set", self.backend.set(&forward_key, &masked, self.ttl))
            .await
        {
            self.metrics.record_write_failure("forward");
            warn!(
                category = %category,
                backend = self.backend.name(),
                error = %e,
                "Failed to store masked value, using synthesized value"
            );
        }
        self.metrics.record_operation_duration("set_forward", start.elapsed());

        let reverse_key = StoreKey::reverse(category, &masked).to_string();
        let start = Instant::now();
        if let Err(e) = ctx
            .run("set", self.backend.set(&reverse_key, original, self.ttl))
            .await
        {
            self.metrics.record_write_failure("reverse");
            debug!(category = %category, error = %e, "Reverse mapping not stored");
        }
        self.metrics.record_operation_duration("set_reverse", start.elapsed());

        Ok(masked)
    }

    /// Best-effort reverse lookup of the original behind a masked value.
    ///
    /// Returns `Ok(None)` when the reverse entry is absent, for instance after
    /// expiry or a failed reverse write.
    pub async fn lookup_original(
        &self,
        ctx: &CallContext,
        masked: &str,
        category: &Category,
    ) -> Result<Option<String>, StoreError> {
        let reverse_key = StoreKey::reverse(category, masked).to_string();
        ctx.run("get", self.backend.get(&reverse_key)).await
    }

    /// Verifies that the backend is reachable.
    pub async fn ping(&self, ctx: &CallContext) -> Result<(), StoreError> {
        ctx.run("ping", self.backend.ping()).await
    }

    /// Releases the backend connection.
    pub async fn close(&self) -> Result<(), StoreError> {
        self.backend.close().await
    }

    /// Returns the backend name.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Returns the entry TTL.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns the metrics for external access.
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("backend", &self.backend.name())
            .field("ttl", &self.ttl)
            .finish()
    }
}
