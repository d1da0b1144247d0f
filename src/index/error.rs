//! Record index error types
//!
//! # Error Types
//!
//! - **`MissingLocale`**: A record lacks the value for the active locale (a data error)
//! - **`KeyNotFound`**: A commit referenced a key the index does not hold
//! - **`InvalidScope`**: A load was requested without a project or locale

use thiserror::Error;

/// Errors raised by the record index
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Record has no translation for the active locale
    #[error("Translation key '{key}' has no value for locale '{locale}'")]
    MissingLocale { key: String, locale: String },

    /// No record with this key in the current set
    #[error("Translation key not found: {0}")]
    KeyNotFound(String),

    /// Project or locale missing
    #[error("Invalid selection: {0}")]
    InvalidScope(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
