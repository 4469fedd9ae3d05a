//! Redmask Server - HTTP host for the Redmask masking engine.
//!
//! Endpoints:
//!
//! - `GET /health`: store reachability (`UP`/`DOWN`)
//! - `POST /v1/logs/mask`: masks a batch of log records
//! - `GET /v1/unmask/{category}/{masked}`: reverse lookup
//! - `GET /metrics`: Prometheus exposition

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use handlers::health::HealthResponse;
pub use handlers::mask::MaskResponse;
pub use handlers::unmask::UnmaskResponse;
pub use server::{create_router_with_state, run_server_with_state};
pub use settings::{Settings, SettingsError, StoreBackend};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
