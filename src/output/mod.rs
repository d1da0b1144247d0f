//! Output formatting for CLI display
//!
//! Record rows, catalog lines, validation issues and the messages shown when
//! there is nothing to list.

use crate::index::LoadStatus;
use crate::models::{Locale, Project, TranslationKey};
use crate::selection::SelectionState;
use crate::session::{EditSession, EditState};
use crate::validation::{Issue, IssueKind};
use chrono::{DateTime, Utc};
use colored::Colorize;

/// Human-readable age of `timestamp` relative to `now`
#[must_use]
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let (amount, unit) = if elapsed.num_minutes() < 1 {
        return "just now".to_string();
    } else if elapsed.num_hours() < 1 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        (elapsed.num_days() / 30, "month")
    } else {
        (elapsed.num_days() / 365, "year")
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Format one record for `locale`
///
/// In quiet mode only `key<TAB>value` is printed.
#[must_use]
pub fn record_row(record: &TranslationKey, locale: &str, now: DateTime<Utc>, quiet: bool) -> String {
    let translation = record.translation(locale);
    let value = translation.map_or("", |t| t.value.as_str());

    if quiet {
        return format!("{}\t{value}", record.key);
    }

    let mut row = format!("  {} {}", record.key.cyan().bold(), format!("[{}]", record.category).dimmed());
    if let Some(description) = &record.description {
        row.push_str(&format!("\n    {}", description.italic()));
    }
    match translation {
        Some(t) => row.push_str(&format!(
            "\n    {value}\n    {}",
            format!("updated {} by {}", format_relative(t.updated_at, now), t.updated_by).dimmed()
        )),
        None => row.push_str(&format!("\n    {}", "(no translation)".yellow())),
    }
    row
}

/// Message shown when the record list is empty
#[must_use]
pub fn empty_records_message(query: &str) -> String {
    if query.is_empty() {
        "No translations found for this project/locale".to_string()
    } else {
        format!("No translations found for the search query \"{query}\"")
    }
}

/// Prompt shown when the selection lacks a project or a locale
#[must_use]
pub fn missing_selection_message(selection: &SelectionState) -> Option<&'static str> {
    if selection.selected_project.is_empty() {
        Some("Please select a project")
    } else if selection.selected_locale.is_empty() {
        Some("Please select a language")
    } else {
        None
    }
}

/// Format a project, marking the selected one
#[must_use]
pub fn project_line(project: &Project, selected: bool) -> String {
    let marker = if selected { "*".green().bold().to_string() } else { " ".to_string() };
    format!("{marker} {} {}", project.id.bold(), project.name)
}

/// Format a locale, marking the selected one
#[must_use]
pub fn locale_line(locale: &Locale, selected: bool) -> String {
    let marker = if selected { "*".green().bold().to_string() } else { " ".to_string() };
    format!("{marker} {} {}", locale.code.bold(), locale.name)
}

/// Format a validation issue
#[must_use]
pub fn issue_line(issue: &Issue<'_>) -> String {
    let kind = match issue.kind {
        IssueKind::Missing => "missing".red(),
        IssueKind::Inconsistent => "unexpected".yellow(),
    };
    format!("  {} [{}] {kind}: {}", issue.key.cyan(), issue.locale, issue.variables.join(", "))
}

/// One-line summary of the record index status
#[must_use]
pub fn load_status_line(status: &LoadStatus, count: usize) -> String {
    match status {
        LoadStatus::Idle => "No records loaded".dimmed().to_string(),
        LoadStatus::Loading => "Loading...".dimmed().to_string(),
        LoadStatus::Ready => format!("{count} record(s) loaded"),
        LoadStatus::Failed(message) => format!("{} {message}", "Error:".red().bold()),
    }
}

/// Format the final state of an edit for display
#[must_use]
pub fn edit_outcome(session: &EditSession) -> String {
    match (session.state(), session.last_error()) {
        (_, Some(error)) => format!(
            "{} {} reverted to \"{}\": {error}",
            "✗".red(),
            session.key().cyan(),
            session.committed()
        ),
        (EditState::Idle, None) => {
            format!("{} {} = \"{}\"", "✓".green(), session.key().cyan(), session.committed())
        }
        (EditState::Editing | EditState::Committing, None) => {
            format!("{} {} is still being edited", "…".yellow(), session.key().cyan())
        }
    }
}
