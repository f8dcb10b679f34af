//! Boundary data sources.
//!
//! A [`BoundarySource`] returns the raw payload for one tier. Validation is
//! left to the cache so every source is classified the same way.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::FetchError;
use crate::model::Tier;

/// Default User-Agent for boundary requests.
const DEFAULT_USER_AGENT: &str = concat!("plantmap/", env!("CARGO_PKG_VERSION"));

/// Provider of raw boundary payloads, one per tier.
///
/// Implementations must be independent per tier: a failure for one tier must
/// not affect the others.
pub trait BoundarySource: Send + Sync {
    /// Fetch the raw feature collection payload for a tier.
    fn fetch(&self, tier: Tier) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Endpoint paths per tier, relative to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryEndpoints {
    pub districts: String,
    pub tambons: String,
    pub villages: String,
}

impl Default for BoundaryEndpoints {
    fn default() -> Self {
        Self {
            districts: "/api/polygons/districts".to_string(),
            tambons: "/api/polygons/tambons".to_string(),
            villages: "/api/polygons/villages".to_string(),
        }
    }
}

impl BoundaryEndpoints {
    /// Path for a tier.
    pub fn path(&self, tier: Tier) -> &str {
        match tier {
            Tier::District => &self.districts,
            Tier::Tambon => &self.tambons,
            Tier::Village => &self.villages,
        }
    }
}

/// Boundary source backed by the boundary data service over HTTP.
#[derive(Clone)]
pub struct HttpBoundarySource {
    client: reqwest::Client,
    base_url: String,
    endpoints: BoundaryEndpoints,
}

impl HttpBoundarySource {
    /// Create a source for `base_url` with the given request timeout.
    pub fn new(
        base_url: impl Into<String>,
        endpoints: BoundaryEndpoints,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    /// Full URL for a tier.
    pub fn url_for(&self, tier: Tier) -> String {
        let path = self.endpoints.path(tier);
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl BoundarySource for HttpBoundarySource {
    async fn fetch(&self, tier: Tier) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(tier);
        trace!(tier = %tier, url = %url, "Boundary request starting");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(
                tier = %tier,
                url = %url,
                error = %e,
                is_timeout = e.is_timeout(),
                "Boundary request failed"
            );
            FetchError::Transport {
                tier,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                tier,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            tier,
            message: format!("failed to read body: {}", e),
        })?;
        debug!(tier = %tier, bytes = body.len(), "Boundary payload received");
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        format!("http {}", self.base_url)
    }
}

/// Boundary source reading `<dir>/<tier>.geojson` files.
#[derive(Debug, Clone)]
pub struct DirectoryBoundarySource {
    directory: PathBuf,
}

impl DirectoryBoundarySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// File backing a tier, e.g. `villages.geojson`.
    pub fn path_for(&self, tier: Tier) -> PathBuf {
        self.directory.join(format!("{}.geojson", tier.as_str()))
    }
}

impl BoundarySource for DirectoryBoundarySource {
    async fn fetch(&self, tier: Tier) -> Result<Vec<u8>, FetchError> {
        let path = self.path_for(tier);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io { tier, source })?;
        debug!(tier = %tier, path = %path.display(), bytes = bytes.len(), "Boundary file read");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.directory.display())
    }
}
