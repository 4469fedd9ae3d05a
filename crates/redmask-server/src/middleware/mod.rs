//! Tower middleware applied to every request.
//!
//! - `RequestIdLayer`: accepts or generates `x-request-id`
//! - `LoggingLayer`: request span and completion log

mod logging;
mod request_id;

pub use logging::{LoggingLayer, LoggingMiddleware};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdMiddleware};
