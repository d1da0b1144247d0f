//! Testing utilities for helium
//!
//! This module provides a `TestStore` wrapper for temporary selection stores,
//! a scripted in-memory `MockSyncClient`, and record fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::client::{SyncClient, SyncError, UpdateBatch};
use crate::models::{
    Locale, Project, TranslationKey, TranslationValue, UpdateResponse, ValidationResult,
};
use crate::selection::SelectionStore;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

/// Temporary selection store directory, removed on drop
///
/// # Examples
/// ```ignore
/// let test_store = TestStore::new();
/// let mut store = test_store.open();
/// store.set_selected_project("proj-1").unwrap();
/// ```
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Create an empty store directory
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Path of the sled database
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("store")
    }

    /// Open (or reopen) the store
    ///
    /// # Panics
    /// Panics if the store cannot be opened.
    pub fn open(&self) -> SelectionStore {
        SelectionStore::open(self.path()).expect("Failed to open test store")
    }
}

/// Build a record with a single locale value
pub fn record(
    id: &str,
    key: &str,
    category: &str,
    description: Option<&str>,
    locale: &str,
    value: &str,
) -> TranslationKey {
    let mut translations = HashMap::new();
    translations.insert(
        locale.to_string(),
        TranslationValue {
            value: value.to_string(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_by: "seed".to_string(),
        },
    );
    TranslationKey {
        id: id.to_string(),
        key: key.to_string(),
        category: category.to_string(),
        description: description.map(str::to_string),
        translations,
    }
}

/// Three records for `locale`; non-English values are suffixed with the locale
pub fn sample_records(locale: &str) -> Vec<TranslationKey> {
    let localized = |value: &str| {
        if locale == "en" {
            value.to_string()
        } else {
            format!("{value} ({locale})")
        }
    };
    vec![
        record("k1", "button.save", "buttons", None, locale, &localized("Save")),
        record("k2", "button.cancel", "buttons", Some("Dismisses the dialog"), locale, &localized("Cancel")),
        record("k3", "app.title", "general", Some("Main window title"), locale, &localized("Helium")),
    ]
}

/// Number of calls made per endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub projects: usize,
    pub locales: usize,
    pub fetch: usize,
    pub update: usize,
    pub validation: usize,
}

#[derive(Debug, Default)]
struct MockState {
    projects: Vec<Project>,
    locales: Vec<Locale>,
    records: HashMap<(String, String), Vec<TranslationKey>>,
    validation: Vec<ValidationResult>,
    locales_error: Option<SyncError>,
    update_error: Option<SyncError>,
    calls: Calls,
}

/// In-memory server of record
///
/// Successful updates are applied to the stored records, so a later fetch
/// sees them.
#[derive(Debug, Default)]
pub struct MockSyncClient {
    state: Mutex<MockState>,
}

impl MockSyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        let mut state = self.state.lock().expect("mock state poisoned");
        f(&mut state)
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        self.with_state(|s| s.projects = projects);
    }

    pub fn set_records(&self, project_id: &str, locale: &str, records: Vec<TranslationKey>) {
        self.with_state(|s| {
            s.records.insert((project_id.to_string(), locale.to_string()), records);
        });
    }

    pub fn set_validation(&self, results: Vec<ValidationResult>) {
        self.with_state(|s| s.validation = results);
    }

    pub fn fail_locales(&self, error: SyncError) {
        self.with_state(|s| s.locales_error = Some(error));
    }

    pub fn fail_updates(&self, error: SyncError) {
        self.with_state(|s| s.update_error = Some(error));
    }

    pub fn calls(&self) -> Calls {
        self.with_state(|s| s.calls)
    }
}

impl SyncClient for MockSyncClient {
    async fn list_projects(&self) -> Result<Vec<Project>, SyncError> {
        self.with_state(|s| {
            s.calls.projects += 1;
            Ok(s.projects.clone())
        })
    }

    async fn list_locales(&self) -> Result<Vec<Locale>, SyncError> {
        self.with_state(|s| {
            s.calls.locales += 1;
            match &s.locales_error {
                Some(e) => Err(e.clone()),
                None => Ok(s.locales.clone()),
            }
        })
    }

    async fn fetch_localizations(
        &self,
        project_id: &str,
        locale: &str,
    ) -> Result<Vec<TranslationKey>, SyncError> {
        self.with_state(|s| {
            s.calls.fetch += 1;
            s.records
                .get(&(project_id.to_string(), locale.to_string()))
                .cloned()
                .ok_or_else(|| SyncError::Upstream { status: 404, message: "Project not found".into() })
        })
    }

    async fn update_localizations(
        &self,
        project_id: &str,
        locale: &str,
        updates: &UpdateBatch,
    ) -> Result<UpdateResponse, SyncError> {
        self.with_state(|s| {
            s.calls.update += 1;
            if let Some(e) = &s.update_error {
                return Err(e.clone());
            }
            let records = s
                .records
                .entry((project_id.to_string(), locale.to_string()))
                .or_default();
            let mut updated = 0;
            for (key, update) in updates {
                if let Some(rec) = records.iter_mut().find(|r| &r.key == key) {
                    rec.translations.insert(
                        locale.to_string(),
                        TranslationValue {
                            value: update.value.clone(),
                            updated_at: Utc::now(),
                            updated_by: update.updated_by.clone(),
                        },
                    );
                    updated += 1;
                }
            }
            Ok(UpdateResponse { message: "Localizations updated".into(), updated_count: updated })
        })
    }

    async fn validation_report(&self, _project_id: &str) -> Result<Vec<ValidationResult>, SyncError> {
        self.with_state(|s| {
            s.calls.validation += 1;
            Ok(s.validation.clone())
        })
    }
}
