//! Kindred CLI - Lay out and explore family trees from the command line.

use clap::Parser;
use kindred_cli::commands;
use kindred_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> kindred_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A config file about to be created does not have to exist yet
    let config = match (&cli.command, cli.config.as_deref()) {
        (Command::Config(args), Some(path)) if args.init && !path.exists() => Config::default(),
        (_, path) => Config::load_from(path)?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Layout(args) => commands::execute_layout(args, &config, &formatter).await?,
        Command::Check(args) => commands::execute_check(args, &config, &formatter).await?,
        Command::Simulate(args) => commands::execute_simulate(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter).await?
        }
    }

    Ok(())
}
