//! Metrics module for the Redmask server.

pub mod http;
pub mod setup;

pub use setup::{build_handle, init_metrics};
