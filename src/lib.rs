//! Helium - client-side engine for editing translation records
//!
//! This library keeps a per-(project, locale) index of translation keys,
//! filters it with a fuzzy matcher, and edits single values through an
//! optimistic commit/rollback session synchronized with a remote service.
//! The user's project, locale and search query survive restarts.

use thiserror::Error;

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod index;
pub mod matcher;
pub mod models;
pub mod output;
pub mod selection;
pub mod session;
pub mod validation;
pub mod workspace;

#[cfg(test)]
pub mod testing;

pub use client::{HttpSyncClient, SyncClient, SyncError};
pub use index::{IndexError, RecordIndex, RecordScope};
pub use selection::{SelectionState, SelectionStore, StoreError};
pub use session::{EditSession, EditState};
pub use workspace::{CommitOutcome, Workspace};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum HeliumError {
    /// Selection store error
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    /// Translation service error
    #[error("Sync error: {0}")]
    SyncError(#[from] SyncError),
    /// Record index error
    #[error("Index error: {0}")]
    IndexError(#[from] IndexError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// A record load was rejected or failed
    #[error("Load failed: {0}")]
    LoadFailed(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
