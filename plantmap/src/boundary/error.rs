//! Boundary fetch and validation errors.

use thiserror::Error;

use crate::model::Tier;

/// Failure to obtain a usable feature collection for a tier.
///
/// Never fatal: the affected tier is treated as absent and its layer omitted.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, body read)
    #[error("Request for {tier} boundaries failed: {message}")]
    Transport { tier: Tier, message: String },

    /// Boundary service answered with a non-success status
    #[error("Boundary service returned HTTP {status} for {tier}")]
    Status { tier: Tier, status: u16 },

    /// Local boundary file could not be read
    #[error("Failed to read {tier} boundaries: {source}")]
    Io {
        tier: Tier,
        #[source]
        source: std::io::Error,
    },

    /// Payload was not JSON
    #[error("Invalid JSON for {tier} boundaries: {message}")]
    InvalidJson { tier: Tier, message: String },

    /// Payload was JSON but not a feature collection
    #[error("Malformed {tier} payload: {reason}")]
    Malformed { tier: Tier, reason: String },
}

impl FetchError {
    /// Tier whose fetch failed.
    pub fn tier(&self) -> Tier {
        match self {
            FetchError::Transport { tier, .. }
            | FetchError::Status { tier, .. }
            | FetchError::Io { tier, .. }
            | FetchError::InvalidJson { tier, .. }
            | FetchError::Malformed { tier, .. } => *tier,
        }
    }
}

/// A single feature that was dropped during validation.
///
/// The rest of the collection is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureDefect {
    /// Entry in `features` is not a feature object
    #[error("feature {index} is not a GeoJSON Feature")]
    NotAFeature { index: usize },

    /// Geometry is neither a recognised tag nor a parseable embedded structure
    #[error("feature {index} has malformed geometry: {reason}")]
    MalformedGeometry { index: usize, reason: String },

    /// A property required for the tier is missing or not a string
    #[error("feature {index} is missing required property '{key}'")]
    MissingProperty { index: usize, key: &'static str },
}

impl FeatureDefect {
    /// Position of the dropped feature in the original payload.
    pub fn index(&self) -> usize {
        match self {
            FeatureDefect::NotAFeature { index }
            | FeatureDefect::MalformedGeometry { index, .. }
            | FeatureDefect::MissingProperty { index, .. } => *index,
        }
    }
}
