//! List command - print the records of the selected project and locale

use super::{Result, ensure_records};
use crate::client::SyncClient;
use crate::models::TranslationKey;
use crate::output;
use crate::workspace::Workspace;
use chrono::Utc;

/// Execute the list command
///
/// With `query`, the search query is persisted first; `Some("")` clears it.
///
/// # Errors
///
/// Returns `HeliumError::StoreError` if the query cannot be saved, or
/// `HeliumError::LoadFailed` if the records cannot be loaded.
pub async fn execute<C: SyncClient>(
    workspace: &mut Workspace<C>,
    query: Option<&str>,
    ranked: bool,
    quiet: bool,
) -> Result<()> {
    if let Some(query) = query {
        workspace.set_search_query(query)?;
    }
    if !ensure_records(workspace, quiet).await? {
        return Ok(());
    }

    let records: Vec<&TranslationKey> = if ranked {
        workspace.ranked_records().into_iter().map(|(record, _)| record).collect()
    } else {
        workspace.visible_records()
    };

    if records.is_empty() {
        if !quiet {
            println!("{}", output::empty_records_message(&workspace.selection().search_query));
        }
        return Ok(());
    }

    let locale = &workspace.selection().selected_locale;
    let now = Utc::now();
    for record in records {
        println!("{}", output::record_row(record, locale, now, quiet));
    }
    Ok(())
}
