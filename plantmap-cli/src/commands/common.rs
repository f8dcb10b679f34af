//! Helpers shared by several commands.

use std::path::{Path, PathBuf};

use plantmap::boundary::{BoundarySource, DirectoryBoundarySource, FetchError, HttpBoundarySource};
use plantmap::config::{BoundarySourceKind, ConfigFile};
use plantmap::model::{decode_records, PlantingRecord, Tier};
use tracing::info;

use crate::error::CliError;

/// The boundary source selected by configuration.
pub enum ConfiguredSource {
    Http(HttpBoundarySource),
    Directory(DirectoryBoundarySource),
}

impl ConfiguredSource {
    /// Build the source from config, with an optional directory override.
    pub fn from_config(
        config: &ConfigFile,
        directory_override: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let settings = &config.boundaries;
        if let Some(directory) = directory_override {
            return Ok(Self::Directory(DirectoryBoundarySource::new(directory)));
        }
        match settings.source {
            BoundarySourceKind::Http => {
                let source = HttpBoundarySource::new(
                    settings.base_url.clone(),
                    settings.endpoints(),
                    settings.timeout(),
                )
                .map_err(|e| CliError::Setup(format!("Failed to create HTTP client: {}", e)))?;
                Ok(Self::Http(source))
            }
            BoundarySourceKind::Directory => match &settings.directory {
                Some(directory) => Ok(Self::Directory(DirectoryBoundarySource::new(directory))),
                None => Err(CliError::Setup(
                    "boundaries.source = directory but boundaries.directory is not set"
                        .to_string(),
                )),
            },
        }
    }
}

impl BoundarySource for ConfiguredSource {
    async fn fetch(&self, tier: Tier) -> Result<Vec<u8>, FetchError> {
        match self {
            ConfiguredSource::Http(source) => source.fetch(tier).await,
            ConfiguredSource::Directory(source) => source.fetch(tier).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfiguredSource::Http(source) => source.describe(),
            ConfiguredSource::Directory(source) => source.describe(),
        }
    }
}

/// Read and decode a records file.
pub fn load_records(path: &Path) -> Result<Vec<PlantingRecord>, CliError> {
    let bytes = std::fs::read(path).map_err(|error| CliError::FileRead {
        path: path.to_path_buf(),
        error,
    })?;
    let records = decode_records(&bytes).map_err(|error| CliError::Records {
        path: path.to_path_buf(),
        error,
    })?;
    info!(path = %path.display(), records = records.len(), "Records loaded");
    Ok(records)
}
