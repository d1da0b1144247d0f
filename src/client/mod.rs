//! Upstream translation service access
//!
//! [`SyncClient`] is the seam between the record engine and the network.
//! [`HttpSyncClient`] implements it over the REST endpoints of the
//! translation service:
//!
//! | Call | Path |
//! |---|---|
//! | list locales | `GET /locales` |
//! | list projects | `GET /projects` |
//! | fetch localizations | `GET /localizations/{projectId}/{locale}` |
//! | update localizations | `POST /localizations/{projectId}/{locale}` |
//! | validation report | `GET /translation-validation/{projectId}` |
//!
//! Any non-success status and any transport failure is reported as a
//! [`SyncError`] carrying a human-readable message: the body's `detail` field
//! when present, else the status reason phrase, else a fixed fallback.

pub mod error;

pub use error::SyncError;

use crate::models::{
    Locale, LocalizationResponse, Project, TranslationKey, TranslationUpdate, UpdateResponse,
    ValidationResult,
};
use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, warn};

pub(crate) const PROJECT_REQUIRED: &str = "Project ID is required";
pub(crate) const LOCALE_REQUIRED: &str = "Locale is required";

/// Map of translation key to its new value, as posted upstream
pub type UpdateBatch = HashMap<String, TranslationUpdate>;

/// Reads and writes translation data upstream
pub trait SyncClient {
    /// `GET /projects`
    fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>, SyncError>> + Send;

    /// `GET /locales`
    fn list_locales(&self) -> impl Future<Output = Result<Vec<Locale>, SyncError>> + Send;

    /// `GET /localizations/{projectId}/{locale}`, flattened to records in server order
    fn fetch_localizations(
        &self,
        project_id: &str,
        locale: &str,
    ) -> impl Future<Output = Result<Vec<TranslationKey>, SyncError>> + Send;

    /// `POST /localizations/{projectId}/{locale}`
    fn update_localizations(
        &self,
        project_id: &str,
        locale: &str,
        updates: &UpdateBatch,
    ) -> impl Future<Output = Result<UpdateResponse, SyncError>> + Send;

    /// `GET /translation-validation/{projectId}`
    fn validation_report(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Vec<ValidationResult>, SyncError>> + Send;
}

/// Reject an empty identifier before any request is made
pub(crate) fn require(value: &str, message: &str) -> Result<(), SyncError> {
    if value.is_empty() {
        return Err(SyncError::Validation(message.to_string()));
    }
    Ok(())
}

/// [`SyncClient`] over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSyncClient {
    /// Create a client for the service rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Validation` if `base_url` is not an absolute URL, or
    /// `SyncError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SyncError::Validation(format!("Invalid API URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::Validation(format!("Invalid API URL '{base_url}'")));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, fallback: &str) -> Result<T, SyncError> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            SyncError::Transport(fallback.to_string())
        })?;
        decode(response, fallback).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B, fallback: &str) -> Result<T, SyncError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self.http.post(url.clone()).json(body).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            SyncError::Transport(fallback.to_string())
        })?;
        decode(response, fallback).await
    }
}

/// Decode a success body, or turn a failure status into `SyncError::Upstream`
async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, SyncError> {
    let status = response.status();
    let url = response.url().clone();

    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            warn!(%url, error = %e, "response body could not be decoded");
            SyncError::Transport(fallback.to_string())
        });
    }

    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string));
    let message = upstream_message(detail, status.canonical_reason(), fallback);
    warn!(%url, status = status.as_u16(), %message, "upstream error");

    Err(SyncError::Upstream { status: status.as_u16(), message })
}

/// Prefer the body's `detail`, then the reason phrase, then the fallback
fn upstream_message(detail: Option<String>, reason: Option<&str>, fallback: &str) -> String {
    detail
        .filter(|d| !d.is_empty())
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}

impl SyncClient for HttpSyncClient {
    async fn list_projects(&self) -> Result<Vec<Project>, SyncError> {
        self.get_json(self.endpoint(&["projects"]), "Failed to fetch projects").await
    }

    async fn list_locales(&self) -> Result<Vec<Locale>, SyncError> {
        self.get_json(self.endpoint(&["locales"]), "Failed to fetch locales").await
    }

    async fn fetch_localizations(
        &self,
        project_id: &str,
        locale: &str,
    ) -> Result<Vec<TranslationKey>, SyncError> {
        require(project_id, PROJECT_REQUIRED)?;
        require(locale, LOCALE_REQUIRED)?;

        let url = self.endpoint(&["localizations", project_id, locale]);
        let response: LocalizationResponse =
            self.get_json(url, "Failed to fetch localizations").await?;
        Ok(response.into_records())
    }

    async fn update_localizations(
        &self,
        project_id: &str,
        locale: &str,
        updates: &UpdateBatch,
    ) -> Result<UpdateResponse, SyncError> {
        require(project_id, PROJECT_REQUIRED)?;
        require(locale, LOCALE_REQUIRED)?;

        let url = self.endpoint(&["localizations", project_id, locale]);
        self.post_json(url, updates, "Failed to update localizations").await
    }

    async fn validation_report(&self, project_id: &str) -> Result<Vec<ValidationResult>, SyncError> {
        require(project_id, PROJECT_REQUIRED)?;

        let url = self.endpoint(&["translation-validation", project_id]);
        self.get_json(url, "An error occurred during validation").await
    }
}
