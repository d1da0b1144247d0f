//! Persisted selection state
//!
//! Holds the selected project, the selected locale and the search query.
//! The store is an explicit container opened once at startup and passed by
//! reference to its consumers. Every change is written through to an embedded
//! sled database under a fixed namespace key, so the selection survives
//! process restarts, and is then broadcast to subscribers.
//!
//! The persisted value is a JSON envelope:
//!
//! ```text
//! {"state": {"selectedProject": "...", "selectedLocale": "...", "searchQuery": "..."}, "version": 0}
//! ```
//!
//! It is restored verbatim; there is no migration logic.

pub mod error;

pub use error::StoreError;

use serde::{Deserialize, Serialize};
use sled::Db;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key under which the selection is persisted
pub const NAMESPACE: &str = "helium-store";

const ENVELOPE_VERSION: u32 = 0;

/// The three user selections every other component reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    #[serde(default)]
    pub selected_project: String,
    #[serde(default)]
    pub selected_locale: String,
    #[serde(default)]
    pub search_query: String,
}

impl SelectionState {
    /// Both a project and a locale have been chosen
    #[must_use]
    pub fn has_scope(&self) -> bool {
        !self.selected_project.is_empty() && !self.selected_locale.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: SelectionState,
    version: u32,
}

/// Handle returned by [`SelectionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&SelectionState) + Send + Sync>;

/// Durable selection container with change subscription
pub struct SelectionStore {
    db: Db,
    state: SelectionState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl SelectionStore {
    /// Default on-disk location of the store
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PathError` if the system data directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| StoreError::PathError("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("helium").join("store"))
    }

    /// Open or create the store at `path` and restore the persisted selection
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or the persisted
    /// value cannot be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let state = match db.get(NAMESPACE)? {
            Some(bytes) => serde_json::from_slice::<Envelope>(&bytes)?.state,
            None => SelectionState::default(),
        };
        debug!(?state, "restored selection");

        Ok(Self {
            db,
            state,
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    /// Current selection
    #[must_use]
    pub const fn get(&self) -> &SelectionState {
        &self.state
    }

    /// Replace the whole selection, persist it and notify subscribers
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be written.
    pub fn set(&mut self, state: SelectionState) -> Result<(), StoreError> {
        if state == self.state {
            return Ok(());
        }

        let envelope = Envelope { state, version: ENVELOPE_VERSION };
        let bytes = serde_json::to_vec(&envelope)?;
        self.db.insert(NAMESPACE, bytes)?;
        self.db.flush()?;

        self.state = envelope.state;
        debug!(state = ?self.state, "selection changed");
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
        Ok(())
    }

    /// Select a project by id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be written.
    pub fn set_selected_project(&mut self, project: impl Into<String>) -> Result<(), StoreError> {
        let state = SelectionState { selected_project: project.into(), ..self.state.clone() };
        self.set(state)
    }

    /// Select a locale by code
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be written.
    pub fn set_selected_locale(&mut self, locale: impl Into<String>) -> Result<(), StoreError> {
        let state = SelectionState { selected_locale: locale.into(), ..self.state.clone() };
        self.set(state)
    }

    /// Replace the search query
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be written.
    pub fn set_search_query(&mut self, query: impl Into<String>) -> Result<(), StoreError> {
        let state = SelectionState { search_query: query.into(), ..self.state.clone() };
        self.set(state)
    }

    /// Register a callback invoked after every change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&SelectionState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
