//! Error types for the token store and engine startup.

use redmask_core::MaskingError;

/// Errors raised by a key-value store backend.
///
/// A clean cache miss is not an error: reads return `Ok(None)` for absent
/// keys. Everything in this enum is a real failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached at startup.
    #[error("failed to connect to {backend} store at {address}: {message}")]
    Connection {
        backend: String,
        address: String,
        message: String,
    },

    /// A store operation failed at the transport level.
    #[error("{backend} {operation} failed: {message}")]
    Transport {
        backend: String,
        operation: &'static str,
        message: String,
    },

    /// The caller cancelled the operation.
    #[error("store {operation} cancelled")]
    Cancelled { operation: &'static str },

    /// The caller's deadline passed before the operation completed.
    #[error("store {operation} exceeded the caller deadline")]
    DeadlineExceeded { operation: &'static str },
}

impl StoreError {
    /// Creates a new connection error.
    pub fn connection(
        backend: impl Into<String>,
        address: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Connection {
            backend: backend.into(),
            address: address.into(),
            message: message.into(),
        }
    }

    /// Creates a new transport error.
    pub fn transport(
        backend: impl Into<String>,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            backend: backend.into(),
            operation,
            message: message.into(),
        }
    }

    /// Returns true for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns true if the caller gave up on the operation.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            Self::Cancelled { .. } | Self::DeadlineExceeded { .. }
        )
    }
}

/// Errors that abort engine startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Invalid patterns or configuration.
    #[error(transparent)]
    Masking(#[from] MaskingError),

    /// The store is unreachable or failed its health check.
    #[error(transparent)]
    Store(#[from] StoreError),
}
