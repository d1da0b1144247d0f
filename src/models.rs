//! Wire and domain types shared by every component
//!
//! These mirror the JSON shapes served by the upstream translation service.
//! `TranslationKey` is the record type held by the record index; the other
//! types are request/response payloads.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A top-level container of translation keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A target language/region code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub code: String,
    pub name: String,
}

/// One translated string and its provenance
///
/// `value`, `updated_at` and `updated_by` are only ever replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

/// A named, categorized string identifier with one value per locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKey {
    pub id: String,
    /// Dotted path, e.g. `button.save`
    pub key: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub translations: HashMap<String, TranslationValue>,
}

impl TranslationKey {
    /// Value for `locale`, if the record carries one
    #[must_use]
    pub fn translation(&self, locale: &str) -> Option<&TranslationValue> {
        self.translations.get(locale)
    }
}

/// Entry of the `localizations` map; the map key is the translation key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationEntry {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub translations: HashMap<String, TranslationValue>,
}

/// Response of `GET /localizations/{projectId}/{locale}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationResponse {
    pub project_id: String,
    pub locale: String,
    /// Insertion order is the server-provided order
    pub localizations: IndexMap<String, LocalizationEntry>,
}

impl LocalizationResponse {
    /// Flatten into records, keeping server order
    #[must_use]
    pub fn into_records(self) -> Vec<TranslationKey> {
        self.localizations
            .into_iter()
            .map(|(key, entry)| TranslationKey {
                id: entry.id,
                key,
                category: entry.category,
                description: entry.description,
                translations: entry.translations,
            })
            .collect()
    }
}

/// Body element of `POST /localizations/{projectId}/{locale}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUpdate {
    pub value: String,
    pub updated_by: String,
}

/// Response of `POST /localizations/{projectId}/{locale}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
    pub updated_count: u64,
}

/// One row of `GET /translation-validation/{projectId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub missing_interpolations: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub inconsistent_interpolations: HashMap<String, Vec<String>>,
}
