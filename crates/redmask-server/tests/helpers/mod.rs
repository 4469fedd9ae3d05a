//! Test helpers para redmask-server.

#![allow(dead_code, unused_imports)]

pub mod app;
pub mod client;

pub use app::{DownStore, client, down_client, engine_with, memory_client, router_for};
pub use client::{TestClient, TestResponse};
