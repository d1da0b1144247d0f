//! Record set for the selected (project, locale) pair
//!
//! The index owns the translation records of exactly one scope. Switching
//! scope drops the whole set; nothing is merged across scopes.
//!
//! # Loads
//!
//! Loads are split into two events so network completions can arrive in any
//! order:
//!
//! ```text
//! begin_load(project, locale) -> LoadTicket     (generation N)
//!     ... request in flight ...
//! finish_load(&ticket, response)                 applied only if N is still the latest
//! ```
//!
//! A response whose ticket has been superseded by a later `begin_load` is
//! discarded, so the last request issued always wins.

pub mod error;

pub use error::IndexError;

use crate::client::{LOCALE_REQUIRED, PROJECT_REQUIRED, SyncError};
use crate::matcher::{self, Score};
use crate::models::{TranslationKey, TranslationValue};
use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

/// The (project, locale) pair a record set belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordScope {
    pub project_id: String,
    pub locale: String,
}

impl RecordScope {
    /// Build a scope, rejecting empty identifiers
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidScope` if either identifier is empty.
    pub fn new(project_id: impl Into<String>, locale: impl Into<String>) -> Result<Self, IndexError> {
        let project_id = project_id.into();
        let locale = locale.into();
        if project_id.is_empty() {
            return Err(IndexError::InvalidScope(PROJECT_REQUIRED.to_string()));
        }
        if locale.is_empty() {
            return Err(IndexError::InvalidScope(LOCALE_REQUIRED.to_string()));
        }
        Ok(Self { project_id, locale })
    }
}

/// Proof of a load request, handed back on completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    scope: RecordScope,
}

impl LoadTicket {
    /// Scope the request was issued for
    #[must_use]
    pub const fn scope(&self) -> &RecordScope {
        &self.scope
    }
}

/// What happened to a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Record set replaced with this many records
    Replaced(usize),
    /// Load failed; the message is kept as the index status
    Failed(String),
    /// A later request superseded this one; nothing changed
    Stale,
}

/// Loading state shown alongside the records
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Translation records of the current scope
#[derive(Debug, Default)]
pub struct RecordIndex {
    scope: Option<RecordScope>,
    records: Vec<TranslationKey>,
    generation: u64,
    status: LoadStatus,
}

impl RecordIndex {
    /// Create an empty index with no scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope of the current record set
    #[must_use]
    pub const fn scope(&self) -> Option<&RecordScope> {
        self.scope.as_ref()
    }

    /// Current loading state
    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// All records in server order
    #[must_use]
    pub fn records(&self) -> &[TranslationKey] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Start a load for `(project_id, locale)`
    ///
    /// A scope change drops the current records immediately. Any earlier
    /// ticket becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidScope` if either identifier is empty.
    pub fn begin_load(&mut self, project_id: &str, locale: &str) -> Result<LoadTicket, IndexError> {
        let scope = RecordScope::new(project_id, locale)?;

        if self.scope.as_ref() != Some(&scope) {
            debug!(project = %scope.project_id, locale = %scope.locale, "scope changed, dropping records");
            self.records.clear();
            self.scope = Some(scope.clone());
        }

        self.generation += 1;
        self.status = LoadStatus::Loading;
        Ok(LoadTicket { generation: self.generation, scope })
    }

    /// Whether `ticket` is the latest request issued
    #[must_use]
    pub const fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Complete the load started with `ticket`
    ///
    /// Stale tickets are ignored. A successful response replaces the whole set
    /// unless some record lacks the scope's locale, which fails the load.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        response: Result<Vec<TranslationKey>, SyncError>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(
                project = %ticket.scope.project_id,
                locale = %ticket.scope.locale,
                "discarding stale load response"
            );
            return LoadOutcome::Stale;
        }

        let records = match response {
            Ok(records) => records,
            Err(e) => {
                warn!(project = %ticket.scope.project_id, locale = %ticket.scope.locale, error = %e, "load failed");
                return self.fail(e.message().to_string());
            }
        };

        let locale = &ticket.scope.locale;
        if let Some(bad) = records.iter().find(|r| r.translation(locale).is_none()) {
            let err = IndexError::MissingLocale { key: bad.key.clone(), locale: locale.clone() };
            error!(error = %err, "rejecting record set");
            return self.fail(err.to_string());
        }

        let count = records.len();
        self.records = records;
        self.status = LoadStatus::Ready;
        debug!(project = %ticket.scope.project_id, locale = %locale, count, "records replaced");
        LoadOutcome::Replaced(count)
    }

    fn fail(&mut self, message: String) -> LoadOutcome {
        self.status = LoadStatus::Failed(message.clone());
        LoadOutcome::Failed(message)
    }

    /// Records passing `query`, in server order
    ///
    /// The empty query returns every record.
    #[must_use]
    pub fn filtered(&self, query: &str) -> Vec<&TranslationKey> {
        if query.is_empty() {
            return self.records.iter().collect();
        }
        let locale = self.locale();
        self.records
            .iter()
            .filter(|r| matcher::match_record(query, r, locale).passed)
            .collect()
    }

    /// Records passing `query`, best rank first
    ///
    /// Equal ranks keep server order.
    #[must_use]
    pub fn ranked(&self, query: &str) -> Vec<(&TranslationKey, Score)> {
        let locale = self.locale();
        let mut ranked: Vec<(&TranslationKey, Score)> = self
            .records
            .iter()
            .filter_map(|r| {
                let result = matcher::match_record(query, r, locale);
                result.passed.then_some((r, result.rank))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Record with this key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationKey> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Value of `key` for the scope's locale
    ///
    /// # Errors
    ///
    /// Returns `IndexError` if there is no scope, no such key, or the record
    /// lacks the locale.
    pub fn value_of(&self, key: &str) -> Result<&TranslationValue, IndexError> {
        let scope = self.require_scope()?;
        let record = self.get(key).ok_or_else(|| IndexError::KeyNotFound(key.to_string()))?;
        record.translation(&scope.locale).ok_or_else(|| IndexError::MissingLocale {
            key: key.to_string(),
            locale: scope.locale.clone(),
        })
    }

    /// Replace the scope-locale value of `key` after a confirmed commit
    ///
    /// Value, timestamp and author are written together.
    ///
    /// # Errors
    ///
    /// Returns `IndexError` if there is no scope, no such key, or the record
    /// lacks the locale.
    pub fn apply_commit(
        &mut self,
        key: &str,
        new_value: &str,
        updated_by: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), IndexError> {
        let locale = self.require_scope()?.locale.clone();
        let record = self
            .records
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| IndexError::KeyNotFound(key.to_string()))?;
        let slot = record
            .translations
            .get_mut(&locale)
            .ok_or_else(|| IndexError::MissingLocale { key: key.to_string(), locale: locale.clone() })?;

        *slot = TranslationValue {
            value: new_value.to_string(),
            updated_at: timestamp,
            updated_by: updated_by.to_string(),
        };
        debug!(%key, %locale, "commit applied to index");
        Ok(())
    }

    fn locale(&self) -> &str {
        self.scope.as_ref().map_or("", |s| s.locale.as_str())
    }

    fn require_scope(&self) -> Result<&RecordScope, IndexError> {
        self.scope
            .as_ref()
            .ok_or_else(|| IndexError::InvalidScope("No project and locale selected".to_string()))
    }
}
