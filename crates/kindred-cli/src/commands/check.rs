//! Check command implementation.

use super::open_session;
use crate::cli::SnapshotArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the check command.
///
/// Fails with [`CliError::Skipped`] when any record was left out.
pub async fn execute_check(args: SnapshotArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (_, report) = open_session(&args.file, config).await?;

    let output = formatter.format_report(&report)?;
    println!("{}", output);

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::Skipped(report.skipped.len()))
    }
}
