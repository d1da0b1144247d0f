//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against a [`Workspace`](crate::workspace::Workspace).

pub mod catalog;
pub mod edit;
pub mod list;
pub mod validate;

pub use catalog::{locales, projects, select, status};
pub use edit::execute as edit;
pub use list::execute as list;
pub use validate::execute as validate;

use crate::client::SyncClient;
use crate::index::LoadOutcome;
use crate::workspace::Workspace;
use crate::{HeliumError, output};

type Result<T> = std::result::Result<T, HeliumError>;

/// Load the records of the current selection
///
/// Returns `false`, after printing a hint, when no project or locale is selected.
async fn ensure_records<C: SyncClient>(workspace: &mut Workspace<C>, quiet: bool) -> Result<bool> {
    if let Some(message) = output::missing_selection_message(workspace.selection()) {
        if !quiet {
            println!("{message}");
        }
        return Ok(false);
    }

    match workspace.load_records().await {
        Some(LoadOutcome::Failed(message)) => Err(HeliumError::LoadFailed(message)),
        Some(LoadOutcome::Replaced(_) | LoadOutcome::Stale) | None => Ok(true),
    }
}
