//! Application state.

use std::time::Duration;

use redmask_engine::{CallContext, MaskingEngine};
use tokio_util::sync::CancellationToken;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    engine: MaskingEngine,
    /// Cancelled when the server starts shutting down.
    shutdown: CancellationToken,
    request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around a started engine.
    pub fn new(engine: MaskingEngine, request_timeout: Duration) -> Self {
        Self {
            engine,
            shutdown: CancellationToken::new(),
            request_timeout,
        }
    }

    /// Returns the masking engine.
    pub fn engine(&self) -> &MaskingEngine {
        &self.engine
    }

    /// Returns the shutdown token.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Returns the per-request store deadline.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Context for the store calls of one request: cancelled on shutdown,
    /// expiring after the request timeout.
    pub fn call_context(&self) -> CallContext {
        CallContext::with_cancel(self.shutdown.child_token()).with_timeout(self.request_timeout)
    }
}
