//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::Path;

use clap::Subcommand;
use plantmap::config::ConfigFile;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(path),
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Init { force } => run_init(path, force),
    }
}

fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    if !path.exists() {
        println!("(file does not exist, defaults are in effect)");
    }
    Ok(())
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    let boundaries = &config.boundaries;

    println!("[boundaries]");
    println!("  source      = {}", boundaries.source);
    println!("  base_url    = {}", boundaries.base_url);
    if let Some(directory) = &boundaries.directory {
        println!("  directory   = {}", directory.display());
    }
    println!("  timeout     = {}s", boundaries.timeout);
    println!();
    println!("[map]");
    println!(
        "  center      = {}, {}",
        config.map.center_lat, config.map.center_lng
    );
    println!("  zoom        = {}", config.map.zoom);
    println!();
    println!("[colors]");
    println!("  saturation  = {}%", config.colors.saturation);
    println!("  lightness   = {}%", config.colors.lightness);
    println!();
    println!("[density]");
    println!("  radius      = {}", config.density.radius);
    println!("  blur        = {}", config.density.blur);
    println!("  max_zoom    = {}", config.density.max_zoom);
    println!();
    println!("[logging]");
    println!("  directory   = {}", config.logging.directory.display());
    println!("  file        = {}", config.logging.file);
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save_to(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if ConfigFile::ensure_exists_at(path)? {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}
