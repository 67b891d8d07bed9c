//! Layout command implementation.

use super::open_session;
use crate::cli::SnapshotArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the layout command.
pub async fn execute_layout(args: SnapshotArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (session, report) = open_session(&args.file, config).await?;

    if !report.is_clean() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} record(s) skipped; run `kindred check` for details",
                report.skipped.len()
            ))
        );
    }

    let output = formatter.format_layout(session.graph(), session.layout())?;
    println!("{}", output);

    Ok(())
}
