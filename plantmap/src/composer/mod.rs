//! Scene composition.
//!
//! [`LayerComposer`] owns the view state and the [`MapContext`], and turns
//! cached boundaries, filtered records and the density surface into an
//! ordered [`Scene`].

mod context;
mod layer_composer;
mod scene;
mod style;

pub use context::{
    BaseTiles, MapContext, DEFAULT_CENTER, DEFAULT_ZOOM, SATELLITE_TILES, STREET_TILES,
};
pub use layer_composer::{ComposerOptions, LayerComposer};
pub use scene::{LayerKind, Marker, MarkerPopup, Scene, SceneLayer};
pub use style::{BoundaryStyle, LayerStyles};
