//! Kindred CLI library.
//!
//! This library provides the core functionality for the `kindred` command-line tool:
//!
//! - Argument parsing ([`Cli`])
//! - Configuration loading from `~/.kindred/config.toml`
//! - Commands that import a snapshot file, lay it out, check it and simulate drags
//! - Table and JSON output formatting

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
