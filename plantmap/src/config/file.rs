//! Configuration file handling for ~/.plantmap/config.ini.
//!
//! Settings structs live in [`super::settings`], defaults in
//! [`super::defaults`], parsing in [`super::parser`] and serialization in
//! [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read or parse the INI file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write the file
    #[error("Failed to write config file: {0}")]
    WriteError(#[source] std::io::Error),

    /// A value failed validation
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create the config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(#[source] std::io::Error),
}

impl ConfigFile {
    /// Load from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }
        std::fs::write(path, super::writer::to_config_string(self))
            .map_err(ConfigFileError::WriteError)
    }

    /// Write a default file at `path` unless one exists. Returns whether a
    /// file was created.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }
}

/// The config directory (~/.plantmap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".plantmap")
}

/// The config file (~/.plantmap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
