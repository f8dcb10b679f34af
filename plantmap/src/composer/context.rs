//! Explicit rendering-surface handle.

use crate::model::{BaseLayer, GeoBounds, LatLng};

/// Default map centre (Satun province).
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 6.6238,
    lng: 99.95,
};

/// Default zoom level.
pub const DEFAULT_ZOOM: u8 = 10;

/// OpenStreetMap street tiles.
pub const STREET_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Esri World Imagery satellite tiles.
pub const SATELLITE_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// Tile URL templates for the two base layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTiles {
    pub street: String,
    pub satellite: String,
}

impl Default for BaseTiles {
    fn default() -> Self {
        Self {
            street: STREET_TILES.to_string(),
            satellite: SATELLITE_TILES.to_string(),
        }
    }
}

impl BaseTiles {
    pub fn url_for(&self, layer: BaseLayer) -> &str {
        match layer {
            BaseLayer::Street => &self.street,
            BaseLayer::Satellite => &self.satellite,
        }
    }
}

/// State of the map surface the scene is drawn on.
///
/// Created and owned by the composer and lent to the router and the density
/// layer; there is no global map instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MapContext {
    ready: bool,
    center: LatLng,
    zoom: u8,
    tiles: BaseTiles,
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM, BaseTiles::default())
    }
}

impl MapContext {
    /// A context for a surface that has not attached yet.
    pub fn new(center: LatLng, zoom: u8, tiles: BaseTiles) -> Self {
        Self {
            ready: false,
            center,
            zoom,
            tiles,
        }
    }

    /// True once the surface can draw and deliver input.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The surface attached.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// The surface went away.
    pub fn detach(&mut self) {
        self.ready = false;
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tiles(&self) -> &BaseTiles {
        &self.tiles
    }

    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    /// Centre the view on `bounds`, keeping the zoom.
    pub fn focus(&mut self, bounds: &GeoBounds) {
        self.center = LatLng::from(bounds.center());
    }
}
