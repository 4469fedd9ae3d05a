//! Error types for Redmask construction.
//!
//! Errors in this module are raised while building the masking engine and
//! are fatal: one bad pattern or an invalid setting aborts startup.
//! Per-call failures (store transport problems) are modelled separately in
//! `redmask-engine` because they are recovered from, one unit at a time.
//!
//! # Example
//!
//! ```
//! use redmask_core::{MaskingError, PatternConfig, PatternSet};
//!
//! let result = PatternSet::compile(&[PatternConfig::new("broken", "(", "X-")]);
//! match result {
//!     Err(MaskingError::PatternCompilation { name, .. }) => assert_eq!(name, "broken"),
//!     _ => panic!("expected a compilation error"),
//! }
//! ```

use thiserror::Error;

/// Construction-time error for the masking engine.
#[derive(Debug, Error)]
pub enum MaskingError {
    /// A configured detection pattern is not a valid regular expression.
    #[error("failed to compile regex pattern '{name}': {source}")]
    PatternCompilation {
        /// Name of the offending pattern
        name: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl MaskingError {
    /// Creates a PatternCompilation error.
    pub fn pattern_compilation(name: impl Into<String>, source: regex::Error) -> Self {
        Self::PatternCompilation {
            name: name.into(),
            source,
        }
    }

    /// Creates an InvalidConfig error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error comes from a bad detection pattern.
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, Self::PatternCompilation { .. })
    }

    /// Returns true if this is a configuration validation error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Type alias for Results with MaskingError.
pub type Result<T> = std::result::Result<T, MaskingError>;
