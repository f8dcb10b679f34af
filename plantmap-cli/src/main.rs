//! plantmap CLI - Command-line interface
//!
//! This binary drives the plantmap layer engine: it loads boundary data and
//! planting records, composes the map scene, and reports on it.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plantmap::config::{config_file_path, ConfigFile};
use plantmap::logging::{init_logging, LoggingGuard};
use tracing::debug;

use commands::color::ColorArgs;
use commands::config::ConfigCommands;
use commands::render::RenderArgs;
use commands::stats::StatsArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "plantmap")]
#[command(version = plantmap::VERSION)]
#[command(about = "Tree planting map layers for Satun province", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.plantmap/config.ini)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the map scene for a records file
    Render(RenderArgs),

    /// Species breakdown and totals for a records file
    Stats(StatsArgs),

    /// Show the marker color for species names
    Color(ColorArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.unwrap_or_else(config_file_path);

    // Config commands must work even when the file is broken
    let command = match cli.command {
        Commands::Config(command) => return commands::config::run(command, &config_path),
        other => other,
    };

    let config = ConfigFile::load_from(&config_path)?;
    let _guard = start_logging(&config, cli.verbose)?;
    debug!(config = %config_path.display(), "Configuration loaded");

    match command {
        Commands::Render(args) => commands::render::run(args, &config).await,
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Color(args) => commands::color::run(args, &config),
        Commands::Config(_) => Ok(()),
    }
}

fn start_logging(config: &ConfigFile, console: bool) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.directory, &config.logging.file, console)
        .map_err(CliError::LoggingInit)
}
