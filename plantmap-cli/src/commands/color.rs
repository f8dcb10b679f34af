//! Color command: show the marker color assigned to species names.

use clap::Args;
use plantmap::config::ConfigFile;

use crate::error::CliError;

/// Arguments for the color command.
#[derive(Debug, Args)]
pub struct ColorArgs {
    /// Species names
    #[arg(required = true)]
    pub names: Vec<String>,
}

pub fn run(args: ColorArgs, config: &ConfigFile) -> Result<(), CliError> {
    let assigner = config.colors.assigner();
    let width = args.names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    for name in &args.names {
        let color = assigner.color_for(name);
        println!("{:<width$}  {}  {}", name, color, color.to_hex(), width = width);
    }
    Ok(())
}
