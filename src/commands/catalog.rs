//! Project and locale commands

use super::Result;
use crate::client::SyncClient;
use crate::cli::SelectCommands;
use crate::index::LoadOutcome;
use crate::workspace::{LoadState, Workspace};
use crate::{HeliumError, output};
use colored::Colorize;

fn loaded_or_err<'a, T>(state: &'a LoadState<Vec<T>>) -> Result<&'a [T]> {
    match state {
        LoadState::Loaded(items) => Ok(items.as_slice()),
        LoadState::Failed(message) => Err(HeliumError::LoadFailed(message.clone())),
        LoadState::NotLoaded => Ok(&[]),
    }
}

/// List available projects, marking the selected one
///
/// # Errors
///
/// Returns `HeliumError::LoadFailed` if the project list cannot be fetched.
pub async fn projects<C: SyncClient>(workspace: &mut Workspace<C>, quiet: bool) -> Result<()> {
    workspace.refresh_catalog().await;
    let selected = workspace.selection().selected_project.clone();
    let projects = loaded_or_err(workspace.projects())?;

    if projects.is_empty() {
        if !quiet {
            println!("No projects found.");
        }
        return Ok(());
    }
    for project in projects {
        if quiet {
            println!("{}", project.id);
        } else {
            println!("{}", output::project_line(project, project.id == selected));
        }
    }
    Ok(())
}

/// List available locales, marking the selected one
///
/// # Errors
///
/// Returns `HeliumError::LoadFailed` if the locale list cannot be fetched.
pub async fn locales<C: SyncClient>(workspace: &mut Workspace<C>, quiet: bool) -> Result<()> {
    workspace.refresh_catalog().await;
    let selected = workspace.selection().selected_locale.clone();
    let locales = loaded_or_err(workspace.locales())?;

    if locales.is_empty() {
        if !quiet {
            println!("No locales found.");
        }
        return Ok(());
    }
    for locale in locales {
        if quiet {
            println!("{}", locale.code);
        } else {
            println!("{}", output::locale_line(locale, locale.code == selected));
        }
    }
    Ok(())
}

/// Persist a project or locale selection and load its records
///
/// # Errors
///
/// Returns `HeliumError::InvalidInput` for an empty id, `HeliumError::StoreError`
/// if the selection cannot be saved, or `HeliumError::LoadFailed` if the
/// records of the new selection cannot be loaded.
pub async fn select<C: SyncClient>(
    workspace: &mut Workspace<C>,
    target: &SelectCommands,
    quiet: bool,
) -> Result<()> {
    let (outcome, what, value) = match target {
        SelectCommands::Project { id } => {
            if id.trim().is_empty() {
                return Err(HeliumError::InvalidInput("Project ID cannot be empty".into()));
            }
            (workspace.select_project(id).await?, "project", id)
        }
        SelectCommands::Locale { code } => {
            if code.trim().is_empty() {
                return Err(HeliumError::InvalidInput("Locale cannot be empty".into()));
            }
            (workspace.select_locale(code).await?, "locale", code)
        }
    };

    if let Some(LoadOutcome::Failed(message)) = outcome {
        return Err(HeliumError::LoadFailed(message));
    }
    if quiet {
        return Ok(());
    }

    println!("{} Selected {what} {}", "✓".green(), value.bold());
    match output::missing_selection_message(workspace.selection()) {
        Some(message) => println!("{message}"),
        None => println!("{}", output::load_status_line(workspace.index().status(), workspace.index().len())),
    }
    Ok(())
}

/// Print the persisted selection
pub fn status<C: SyncClient>(workspace: &Workspace<C>, api_url: &str, quiet: bool) {
    let selection = workspace.selection();
    let or_none = |value: &str| if value.is_empty() { "(none)".to_string() } else { value.to_string() };

    if quiet {
        println!("{}\t{}\t{}", selection.selected_project, selection.selected_locale, selection.search_query);
        return;
    }
    println!("Service:  {api_url}");
    println!("Project:  {}", or_none(&selection.selected_project));
    println!("Locale:   {}", or_none(&selection.selected_locale));
    println!("Search:   {}", or_none(&selection.search_query));
}
