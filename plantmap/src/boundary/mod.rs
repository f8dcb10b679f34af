//! Administrative boundary loading.
//!
//! Boundary geometry for the three tiers is fetched from a [`BoundarySource`],
//! validated into [`FeatureCollection`]s and held in a [`BoundaryCache`] that
//! resolves out-of-order fetches by generation.

mod cache;
mod error;
mod geojson;
mod source;

pub use cache::{BoundaryCache, CommitOutcome, FetchTicket, LoadReport, TierState};
pub use error::{FeatureDefect, FetchError};
pub use geojson::{
    parse_feature_collection, validate_feature_collection, BoundaryFeature, FeatureCollection,
    ValidatedCollection,
};
pub use source::{BoundaryEndpoints, BoundarySource, DirectoryBoundarySource, HttpBoundarySource};
