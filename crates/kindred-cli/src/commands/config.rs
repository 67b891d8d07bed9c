//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Prints the effective configuration, or with `--init` writes the defaults to
/// `path` (the default location when `None`).
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    if !args.init {
        let output = match formatter.format() {
            OutputFormat::Json => serde_json::to_string_pretty(config)?,
            OutputFormat::Table => config.to_toml()?,
        };
        println!("{}", output);
        return Ok(());
    }

    let target = match path {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };
    if target.exists() && !args.force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }

    Config::default().save_to(&target)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", target.display()))
    );

    Ok(())
}
