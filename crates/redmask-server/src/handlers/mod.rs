//! HTTP handlers.

pub mod health;
pub mod mask;
pub mod metrics;
pub mod unmask;
