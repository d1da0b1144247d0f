//! Validate command - print interpolation problems of the selected project

use super::Result;
use crate::client::SyncClient;
use crate::output;
use crate::workspace::Workspace;
use colored::Colorize;

/// Execute the validate command
///
/// # Errors
///
/// Returns `HeliumError::SyncError` if no project is selected or the report
/// cannot be fetched.
pub async fn execute<C: SyncClient>(workspace: &Workspace<C>, quiet: bool) -> Result<()> {
    let report = workspace.validate().await?;

    if report.is_clean() {
        if !quiet {
            println!("{} No interpolation problems found", "✓".green());
        }
        return Ok(());
    }

    if !quiet {
        println!("Interpolation problems:");
    }
    for issue in report.issues() {
        println!("{}", output::issue_line(&issue));
    }
    Ok(())
}
