//! Event-driven orchestration of selection, records and cell edits
//!
//! A [`Workspace`] is built once at startup from a [`SyncClient`] and an
//! opened [`SelectionStore`], and is the only writer of the record index.
//!
//! Every network round trip is split into a request event and a completion
//! event so completions can be fed back in any order:
//!
//! - records: [`Workspace::request_records`] → [`Workspace::fetch_records`] →
//!   [`Workspace::complete_records`]
//! - commits: [`EditSession::blur`] → [`Workspace::send_commit`] →
//!   [`Workspace::complete_commit`]
//!
//! The `async` helpers ([`Workspace::load_records`], [`Workspace::commit`], ...)
//! chain those steps for callers that do not interleave events.
//!
//! After every acknowledged commit the local record is updated at once and a
//! full reload of the active (project, locale) is issued to pick up edits made
//! elsewhere. Until it lands, other rows may be stale.

use crate::client::{SyncClient, SyncError};
use crate::index::{IndexError, LoadOutcome, LoadTicket, RecordIndex};
use crate::matcher::Score;
use crate::models::{Locale, Project, TranslationKey, UpdateResponse};
use crate::selection::{SelectionState, SelectionStore, StoreError};
use crate::session::{CommitRequest, EditSession};
use crate::validation::{self, ValidationReport};
use chrono::Utc;
use tracing::{debug, info, warn};

/// A fetched list together with its loading state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loaded(T),
    /// Message shown inline in place of the list
    Failed(String),
}

impl<T> LoadState<T> {
    fn from_result(result: Result<T, SyncError>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(e) => {
                warn!(error = %e, "failed to load {what}");
                Self::Failed(e.message().to_string())
            }
        }
    }

    /// The loaded value, if any
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded | Self::Failed(_) => None,
        }
    }
}

/// Result of completing a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Upstream acknowledged; `reconcile` is the follow-up reload, if the
    /// commit's scope is still active
    Committed {
        response: UpdateResponse,
        reconcile: Option<LoadTicket>,
    },
    /// Commit failed and the cell was reverted
    RolledBack(SyncError),
}

/// Selection, record set and catalogs behind one client
#[derive(Debug)]
pub struct Workspace<C> {
    client: C,
    store: SelectionStore,
    index: RecordIndex,
    projects: LoadState<Vec<Project>>,
    locales: LoadState<Vec<Locale>>,
}

impl<C: SyncClient> Workspace<C> {
    #[must_use]
    pub fn new(client: C, store: SelectionStore) -> Self {
        Self {
            client,
            store,
            index: RecordIndex::new(),
            projects: LoadState::NotLoaded,
            locales: LoadState::NotLoaded,
        }
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    pub const fn selection(&self) -> &SelectionState {
        self.store.get()
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore {
        &mut self.store
    }

    pub const fn index(&self) -> &RecordIndex {
        &self.index
    }

    pub const fn projects(&self) -> &LoadState<Vec<Project>> {
        &self.projects
    }

    pub const fn locales(&self) -> &LoadState<Vec<Locale>> {
        &self.locales
    }

    /// Re-fetch the project and locale lists
    ///
    /// Failures are kept as inline error states and do not affect each other.
    pub async fn refresh_catalog(&mut self) {
        self.projects = LoadState::from_result(self.client.list_projects().await, "projects");
        self.locales = LoadState::from_result(self.client.list_locales().await, "locales");
    }

    /// Start a record load for the current selection
    ///
    /// Returns `None` while the project or the locale is unselected.
    pub fn request_records(&mut self) -> Option<LoadTicket> {
        let selection = self.store.get();
        if !selection.has_scope() {
            return None;
        }
        let project = selection.selected_project.clone();
        let locale = selection.selected_locale.clone();
        match self.index.begin_load(&project, &locale) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                warn!(error = %e, "record load not started");
                None
            }
        }
    }

    /// Network half of a record load
    ///
    /// # Errors
    ///
    /// Returns the client's `SyncError` if the fetch fails.
    pub async fn fetch_records(&self, ticket: &LoadTicket) -> Result<Vec<TranslationKey>, SyncError> {
        let scope = ticket.scope();
        self.client.fetch_localizations(&scope.project_id, &scope.locale).await
    }

    /// Completion half of a record load; stale tickets are discarded
    pub fn complete_records(
        &mut self,
        ticket: &LoadTicket,
        response: Result<Vec<TranslationKey>, SyncError>,
    ) -> LoadOutcome {
        self.index.finish_load(ticket, response)
    }

    /// Load the records of the current selection
    pub async fn load_records(&mut self) -> Option<LoadOutcome> {
        let ticket = self.request_records()?;
        let response = self.fetch_records(&ticket).await;
        Some(self.complete_records(&ticket, response))
    }

    /// Select a project and load its records
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be persisted.
    pub async fn select_project(&mut self, project_id: &str) -> Result<Option<LoadOutcome>, StoreError> {
        self.store.set_selected_project(project_id)?;
        Ok(self.load_records().await)
    }

    /// Select a locale and load its records
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be persisted.
    pub async fn select_locale(&mut self, locale: &str) -> Result<Option<LoadOutcome>, StoreError> {
        self.store.set_selected_locale(locale)?;
        Ok(self.load_records().await)
    }

    /// Persist a new search query
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selection cannot be persisted.
    pub fn set_search_query(&mut self, query: &str) -> Result<(), StoreError> {
        self.store.set_search_query(query)
    }

    /// Records passing the current search query, in server order
    #[must_use]
    pub fn visible_records(&self) -> Vec<&TranslationKey> {
        self.index.filtered(&self.store.get().search_query)
    }

    /// Records passing the current search query, best match first
    #[must_use]
    pub fn ranked_records(&self) -> Vec<(&TranslationKey, Score)> {
        self.index.ranked(&self.store.get().search_query)
    }

    /// Edit session for the value cell of `key`
    ///
    /// # Errors
    ///
    /// Returns `IndexError` if nothing is loaded, the key is unknown, or the
    /// record lacks the active locale.
    pub fn open_cell(&self, key: &str) -> Result<EditSession, IndexError> {
        let value = self.index.value_of(key)?;
        let scope = self
            .index
            .scope()
            .ok_or_else(|| IndexError::InvalidScope("No project and locale selected".to_string()))?;
        Ok(EditSession::new(scope.clone(), key, value.value.clone()))
    }

    /// Network half of a commit
    ///
    /// # Errors
    ///
    /// Returns the client's `SyncError` if the update fails.
    pub async fn send_commit(&self, request: &CommitRequest) -> Result<UpdateResponse, SyncError> {
        info!(key = %request.key, project = %request.scope.project_id, locale = %request.scope.locale, "sending commit");
        self.client
            .update_localizations(&request.scope.project_id, &request.scope.locale, &request.to_batch())
            .await
    }

    /// Completion half of a commit
    ///
    /// On success the session is promoted, the record is updated in place if
    /// its scope is still active, and a reconciliation load is started. On
    /// failure the session is reverted and the index is left untouched.
    pub fn complete_commit(
        &mut self,
        session: &mut EditSession,
        request: &CommitRequest,
        response: Result<UpdateResponse, SyncError>,
    ) -> CommitOutcome {
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                session.commit_failed(e.message());
                return CommitOutcome::RolledBack(e);
            }
        };

        session.commit_succeeded();
        info!(key = %request.key, updated = response.updated_count, "commit acknowledged");

        if self.index.scope() != Some(&request.scope) {
            debug!(key = %request.key, "commit scope no longer active, index untouched");
            return CommitOutcome::Committed { response, reconcile: None };
        }

        if let Err(e) = self.index.apply_commit(&request.key, &request.value, &request.updated_by, Utc::now()) {
            warn!(error = %e, "acknowledged commit could not be applied locally");
        }
        let reconcile = self
            .index
            .begin_load(&request.scope.project_id, &request.scope.locale)
            .ok();
        CommitOutcome::Committed { response, reconcile }
    }

    /// Blur `session` and, if that produced a request, commit and reconcile
    ///
    /// Returns `None` when there was nothing to commit.
    pub async fn commit(&mut self, session: &mut EditSession) -> Option<CommitOutcome> {
        let request = session.blur()?;
        let response = self.send_commit(&request).await;
        let outcome = self.complete_commit(session, &request, response);

        if let CommitOutcome::Committed { reconcile: Some(ticket), .. } = &outcome {
            let records = self.fetch_records(ticket).await;
            if let LoadOutcome::Replaced(_) = self.complete_records(ticket, records)
                && let Ok(value) = self.index.value_of(session.key())
            {
                session.refresh_committed(value.value.clone());
            }
        }
        Some(outcome)
    }

    /// Fetch the validation report of the selected project
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` if no project is selected, or the
    /// client's error if the fetch fails.
    pub async fn validate(&self) -> Result<ValidationReport, SyncError> {
        validation::validate_project(&self.client, &self.store.get().selected_project).await
    }
}
