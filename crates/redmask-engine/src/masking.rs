//! Masking engine.
//!
//! The engine masks one unit at a time: an attribute value, or one pattern
//! match inside a body. A failing unit is logged and left unmasked; it never
//! aborts the rest of the record or batch.

use std::collections::HashSet;
use std::sync::Arc;

use redmask_core::{Category, DigestSynthesizer, PatternConfig, PatternSet};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::context::CallContext;
use crate::error::{StartupError, StoreError};
use crate::metrics::record_unit;
use crate::record::{BatchSummary, LogBatch, LogRecord, RecordOutcome, attribute_text};
use crate::store::{self, KeyValueStore, StoreConfig, TokenStore};

/// Everything needed to start an engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Attribute names whose values are masked.
    pub fields_to_mask: Vec<String>,
    /// Detection patterns, applied in order to string bodies.
    pub patterns: Vec<PatternConfig>,
    /// Store backend and TTL.
    pub store: StoreConfig,
}

/// Deterministic, cache-backed masking engine.
///
/// Holds the compiled patterns and the store connection, nothing else;
/// calls share no mutable state and may run concurrently. Clones share the
/// same store.
#[derive(Clone)]
pub struct MaskingEngine {
    fields_to_mask: Arc<HashSet<String>>,
    patterns: Arc<PatternSet>,
    store: TokenStore,
}

impl MaskingEngine {
    /// Creates an engine from already-built parts.
    pub fn new(
        fields_to_mask: impl IntoIterator<Item = impl Into<String>>,
        patterns: PatternSet,
        store: TokenStore,
    ) -> Self {
        Self {
            fields_to_mask: Arc::new(fields_to_mask.into_iter().map(Into::into).collect()),
            patterns: Arc::new(patterns),
            store,
        }
    }

    /// Compiles patterns, opens the store and checks it is reachable.
    ///
    /// Patterns are compiled before any connection is made. If the health
    /// check fails the connection is closed before the error is returned.
    ///
    /// # Errors
    ///
    /// - `StartupError::Masking` if a pattern does not compile
    /// - `StartupError::Store` with `StoreError::Connection` if the store is
    ///   unreachable or fails its health check
    pub async fn start(config: EngineConfig) -> Result<Self, StartupError> {
        let patterns = PatternSet::compile(&config.patterns)?;
        let backend = store::open(&config.store).await?;

        Self::launch(config, patterns, backend).await
    }

    /// Starts an engine over an already opened backend.
    ///
    /// The backend is owned by the engine from here on: it is closed when
    /// a pattern fails to compile or the health check fails.
    pub async fn start_with_backend(
        config: EngineConfig,
        backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StartupError> {
        let patterns = match PatternSet::compile(&config.patterns) {
            Ok(patterns) => patterns,
            Err(e) => {
                close_after_failure(backend.as_ref()).await;
                return Err(e.into());
            }
        };

        Self::launch(config, patterns, backend).await
    }

    async fn launch(
        config: EngineConfig,
        patterns: PatternSet,
        backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StartupError> {
        if let Err(e) = backend.ping().await {
            close_after_failure(backend.as_ref()).await;
            return Err(StoreError::connection(
                backend.name(),
                config.store.backend().address(),
                e.to_string(),
            )
            .into());
        }

        info!(
            backend = backend.name(),
            patterns = patterns.len(),
            fields = config.fields_to_mask.len(),
            ttl_seconds = config.store.token_ttl(),
            "Masking engine started"
        );

        let synthesizer = Arc::new(DigestSynthesizer::from_patterns(&patterns));
        let store = TokenStore::new(backend, synthesizer, config.store.expiry());

        Ok(Self::new(config.fields_to_mask, patterns, store))
    }

    /// Releases the store connection.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        info!(backend = self.store.backend_name(), "Shutting down masking engine");
        self.store.close().await
    }

    /// Checks that the store is still reachable.
    pub async fn health_check(&self, ctx: &CallContext) -> Result<(), StoreError> {
        self.store.ping(ctx).await
    }

    /// Returns the token store.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Returns the compiled patterns.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Returns true if the attribute is configured for masking.
    pub fn should_mask(&self, field_name: &str) -> bool {
        self.fields_to_mask.contains(field_name)
    }

    /// Masks an attribute value.
    ///
    /// On failure the error is logged and the original value is returned
    /// unchanged.
    pub async fn mask_field(&self, ctx: &CallContext, value: &str, field_name: &str) -> String {
        match self.try_mask_field(ctx, value, field_name).await {
            Ok(masked) => masked,
            Err(e) => {
                warn!(field = %field_name, error = %e, "Failed to mask attribute");
                value.to_string()
            }
        }
    }

    /// Masks an attribute value, reporting store failures to the caller.
    pub async fn try_mask_field(
        &self,
        ctx: &CallContext,
        value: &str,
        field_name: &str,
    ) -> Result<String, StoreError> {
        let category = Category::attribute(field_name);
        let result = self.store.get_or_create(ctx, value, &category).await;
        record_unit("field", if result.is_ok() { "masked" } else { "failed" });
        result
    }

    /// Masks every pattern match in a body.
    ///
    /// Patterns run in configured order, each one over the text produced by
    /// the previous ones. Every literal occurrence of a matched substring is
    /// replaced, including occurrences outside the matched span. A match
    /// whose store call fails is left in place.
    pub async fn mask_body(&self, ctx: &CallContext, text: &str) -> String {
        let mut result = text.to_string();

        for pattern in self.patterns.iter() {
            let matches: Vec<String> = pattern
                .find_all(&result)
                .into_iter()
                .map(str::to_owned)
                .collect();

            for found in matches {
                match self
                    .store
                    .get_or_create(ctx, &found, pattern.category())
                    .await
                {
                    Ok(masked) => {
                        record_unit("match", "masked");
                        result = result.replace(&found, &masked);
                    }
                    Err(e) => {
                        record_unit("match", "failed");
                        warn!(pattern = %pattern.name(), error = %e, "Failed to mask value");
                    }
                }
            }
        }

        result
    }

    /// Masks the configured attributes and the string body of a record.
    pub async fn mask_record(&self, ctx: &CallContext, record: &mut LogRecord) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();

        for (key, value) in record.attributes.iter_mut() {
            if !self.should_mask(key) {
                continue;
            }

            let original = attribute_text(value);
            match self.try_mask_field(ctx, &original, key).await {
                Ok(masked) => {
                    *value = Value::String(masked);
                    outcome.fields_masked += 1;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to mask attribute");
                    outcome.fields_failed += 1;
                }
            }
        }

        if let Some(Value::String(body)) = record.body.as_mut() {
            let masked = self.mask_body(ctx, body).await;
            if masked != *body {
                *body = masked;
                outcome.body_masked = true;
            }
        }

        outcome
    }

    /// Masks every record of a batch in place.
    ///
    /// Records are independent: partial masking of one record does not stop
    /// the others.
    pub async fn process_batch(&self, ctx: &CallContext, batch: &mut LogBatch) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for record in batch.records.iter_mut() {
            summary.absorb(self.mask_record(ctx, record).await);
        }

        debug!(
            records = summary.records,
            fields_masked = summary.fields_masked,
            fields_failed = summary.fields_failed,
            bodies_masked = summary.bodies_masked,
            "Batch processed"
        );

        summary
    }
}

async fn close_after_failure(backend: &dyn KeyValueStore) {
    if let Err(e) = backend.close().await {
        warn!(error = %e, "Failed to close store after startup failure");
    }
}

impl std::fmt::Debug for MaskingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskingEngine")
            .field("fields_to_mask", &self.fields_to_mask)
            .field("patterns", &self.patterns.len())
            .field("store", &self.store)
            .finish()
    }
}
