//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use kindred_domain::Position;
use std::path::PathBuf;

/// Kindred CLI - Lay out and explore family trees.
#[derive(Debug, Parser)]
#[command(name = "kindred")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KINDRED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a snapshot and print every person's position
    Layout(SnapshotArgs),

    /// Import a snapshot and report records that break the rules
    Check(SnapshotArgs),

    /// Drag one person towards a target and watch them settle
    Simulate(SimulateArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for commands that read a snapshot.
#[derive(Debug, Parser)]
pub struct SnapshotArgs {
    /// JSON snapshot file (people and relationships)
    pub file: PathBuf,
}

/// Arguments for the simulate command.
#[derive(Debug, Parser)]
pub struct SimulateArgs {
    /// JSON snapshot file (people and relationships)
    pub file: PathBuf,

    /// Name of the person to drag
    #[arg(short, long)]
    pub person: String,

    /// Drag target (format: x,y,z)
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Position,

    /// Number of ticks to run after release
    #[arg(long, default_value = "120")]
    pub ticks: usize,

    /// Seconds per tick
    #[arg(long, default_value = "0.016666666666666666")]
    pub dt: f64,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the default configuration file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file when used with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Parse a point written as `x,y,z`.
pub fn parse_point(value: &str) -> std::result::Result<Position, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", value));
    }

    let mut coords = [0.0; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        let parsed: f64 = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
        if !parsed.is_finite() {
            return Err(format!("'{}' is not a finite number", part));
        }
        *slot = parsed;
    }
    Ok(Position::new(coords[0], coords[1], coords[2]))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
