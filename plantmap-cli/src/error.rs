//! CLI error handling with user-friendly messages.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error,
//! any hint that applies, and exits with status 1.

use std::fmt;
use std::path::PathBuf;
use std::process;

use plantmap::config::ConfigFileError;
use plantmap::model::RecordError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Configuration is valid but unusable for this command
    Setup(String),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: std::io::Error },
    /// Records file is not a record list
    Records { path: PathBuf, error: RecordError },
    /// Failed to serialize output
    Output(serde_json::Error),
}

impl CliError {
    /// Print the error and exit with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in the config file, or recreate it with:");
                eprintln!("  plantmap config init --force");
            }
            CliError::Records { .. } => {
                eprintln!();
                eprintln!("The records file must hold a JSON array of planting records,");
                eprintln!("as returned by the persistence service's /api/trees endpoint.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Setup(msg) => write!(f, "{}", msg),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read '{}': {}", path.display(), error)
            }
            CliError::Records { path, error } => {
                write!(f, "Failed to read records from '{}': {}", path.display(), error)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::Records { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            CliError::Setup(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
