//! Edit command - change one value and commit it

use super::{Result, ensure_records};
use crate::client::SyncClient;
use crate::output;
use crate::workspace::{CommitOutcome, Workspace};

/// Execute the edit command
///
/// The cell is focused, its draft replaced by `value` and then blurred, the
/// same sequence an interactive edit goes through. An unchanged value makes
/// no request.
///
/// # Errors
///
/// Returns `HeliumError::IndexError` if `key` is not loaded,
/// `HeliumError::LoadFailed` if the records cannot be loaded, or
/// `HeliumError::SyncError` if the commit was rolled back.
pub async fn execute<C: SyncClient>(
    workspace: &mut Workspace<C>,
    key: &str,
    value: &str,
    quiet: bool,
) -> Result<()> {
    if !ensure_records(workspace, quiet).await? {
        return Ok(());
    }

    let mut session = workspace.open_cell(key)?;
    session.focus();
    session.input(value, None);

    match workspace.commit(&mut session).await {
        None => {
            if !quiet {
                println!("{key} is unchanged");
            }
            Ok(())
        }
        Some(CommitOutcome::Committed { .. }) => {
            if !quiet {
                println!("{}", output::edit_outcome(&session));
            }
            Ok(())
        }
        Some(CommitOutcome::RolledBack(e)) => {
            if !quiet {
                println!("{}", output::edit_outcome(&session));
            }
            Err(e.into())
        }
    }
}
