//! Read-only translation validation report
//!
//! The report is computed upstream; this module only fetches it and offers a
//! few views over it for display.

use crate::client::{PROJECT_REQUIRED, SyncClient, SyncError, require};
use crate::models::ValidationResult;
use std::collections::BTreeSet;
use tracing::info;

/// Kind of interpolation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    /// Variables of the source text absent from the translation
    Missing,
    /// Variables present in the translation but not in the source text
    Inconsistent,
}

/// One (key, locale) problem flattened out of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue<'a> {
    pub key: &'a str,
    pub locale: &'a str,
    pub kind: IssueKind,
    pub variables: &'a [String],
}

/// Validation results for one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// No key has a problem in any locale
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues().next().is_none()
    }

    /// Every problem, ordered by key then locale
    pub fn issues(&self) -> impl Iterator<Item = Issue<'_>> {
        self.results.iter().flat_map(|result| {
            let mut issues: Vec<Issue<'_>> = result
                .missing_interpolations
                .iter()
                .map(|(locale, vars)| (locale, IssueKind::Missing, vars))
                .chain(
                    result
                        .inconsistent_interpolations
                        .iter()
                        .map(|(locale, vars)| (locale, IssueKind::Inconsistent, vars)),
                )
                .filter(|(_, _, vars)| !vars.is_empty())
                .map(|(locale, kind, vars)| Issue {
                    key: result.key.as_str(),
                    locale: locale.as_str(),
                    kind,
                    variables: vars.as_slice(),
                })
                .collect();
            issues.sort_by(|a, b| a.locale.cmp(b.locale).then(a.kind.cmp(&b.kind)));
            issues
        })
    }

    /// Locales with at least one problem for `key`
    #[must_use]
    pub fn problem_locales(&self, key: &str) -> BTreeSet<&str> {
        self.issues().filter(|i| i.key == key).map(|i| i.locale).collect()
    }
}

/// Fetch the validation report for `project_id`
///
/// # Errors
///
/// Returns `SyncError::Validation` for an empty project id without making a
/// request, or the client's error if the fetch fails.
pub async fn validate_project<C: SyncClient>(
    client: &C,
    project_id: &str,
) -> Result<ValidationReport, SyncError> {
    require(project_id, PROJECT_REQUIRED)?;
    let results = client.validation_report(project_id).await?;
    info!(project = %project_id, keys = results.len(), "validation report fetched");
    Ok(ValidationReport { results })
}
