//! Selection store error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`SerializeError`**: The persisted selection could not be encoded or decoded
//! - **`PathError`**: No storage location could be determined

use thiserror::Error;

/// Errors raised while opening, reading or writing the selection store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Persisted selection is not valid structured text
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Storage location could not be resolved
    #[error("Could not determine store location: {0}")]
    PathError(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
