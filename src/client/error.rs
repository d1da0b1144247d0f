//! Sync client error types
//!
//! Every network or decoding failure is converted into one of these at the
//! call site; no raw transport error reaches the caller.
//!
//! # Error Types
//!
//! - **`Transport`**: The request never reached the server or the body could not be parsed
//! - **`Upstream`**: Non-success status, carrying the upstream `detail` when present
//! - **`Validation`**: A required identifier was missing; no request was made

use thiserror::Error;

/// Failures surfaced by a [`SyncClient`](super::SyncClient)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Request failed before a usable response arrived
    #[error("{0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Caller-supplied identifier missing
    #[error("{0}")]
    Validation(String),
}

impl SyncError {
    /// Human-readable message for display
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(message) | Self::Validation(message) => message,
            Self::Upstream { message, .. } => message,
        }
    }

    /// HTTP status, when the failure came from a response
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(_) | Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
