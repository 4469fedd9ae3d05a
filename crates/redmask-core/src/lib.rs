//! Redmask Core - Domain types for deterministic tokenization
//!
//! This crate provides the pure building blocks of the masking engine:
//!
//! - [`Category`]: namespace tag for a class of sensitive value
//! - [`PatternSet`]: ordered, immutable set of compiled detection patterns
//! - [`DigestSynthesizer`]: deterministic original → masked value function
//! - [`MaskingError`]: construction-time error taxonomy
//!
//! Nothing here performs I/O. The cache-backed store and the masking engine
//! live in `redmask-engine`.

pub mod category;
pub mod error;
pub mod pattern;
pub mod synth;

pub use category::{ATTRIBUTE_MARKER, Category};
pub use error::{MaskingError, Result};
pub use pattern::{Pattern, PatternConfig, PatternSet, default_patterns};
pub use synth::{DigestSynthesizer, Synthesize};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
