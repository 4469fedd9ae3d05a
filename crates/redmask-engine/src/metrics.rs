//! Token store and masking metrics recording.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::{counter, histogram};

/// Registra las metricas del token store y del engine.
/// Llamar una vez al inicio, despues de instalar el recorder.
pub fn register_engine_metrics() {
    metrics::describe_counter!("redmask_store_hits_total", "Forward lookups served from the store");
    metrics::describe_counter!(
        "redmask_store_misses_total",
        "Forward lookups that required synthesis"
    );
    metrics::describe_counter!(
        "redmask_store_read_errors_total",
        "Forward lookups that failed at the transport level"
    );
    metrics::describe_counter!(
        "redmask_store_write_failures_total",
        "Forward or reverse writes that failed and were skipped"
    );
    metrics::describe_histogram!(
        "redmask_store_operation_seconds",
        "Time spent on store operations"
    );
    metrics::describe_counter!(
        "redmask_masking_units_total",
        "Masking units processed, by kind and outcome"
    );
}

/// Recorder de metricas del token store.
/// Usa atomic counters internos para calcular hit rate sin consultar el exporter.
#[derive(Debug, Clone, Default)]
pub struct StoreMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    read_errors: Arc<AtomicU64>,
    write_failures: Arc<AtomicU64>,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("redmask_store_hits_total").increment(1);
    }

    /// Registra un miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("redmask_store_misses_total").increment(1);
    }

    /// Registra un error de lectura
    pub fn record_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
        counter!("redmask_store_read_errors_total").increment(1);
    }

    /// Registra una escritura fallida ("forward" o "reverse")
    pub fn record_write_failure(&self, entry: &'static str) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
        counter!("redmask_store_write_failures_total", "entry" => entry).increment(1);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("redmask_store_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn read_errors(&self) -> u64 {
        self.read_errors.load(Ordering::Relaxed)
    }

    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }
}

/// Registra el resultado de una unidad de masking.
pub fn record_unit(kind: &'static str, outcome: &'static str) {
    counter!("redmask_masking_units_total", "kind" => kind, "outcome" => outcome).increment(1);
}
