//! Renderable scene graph.
//!
//! A [`Scene`] is a snapshot of what should be drawn, bottom layer first:
//!
//! ```text
//! Base tiles
//! Boundary(districts)
//! Boundary(tambons)
//! Boundary(villages)
//! Density surface
//! Markers
//! ```
//!
//! Layers that are hidden or whose data is unavailable are simply absent.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::style::BoundaryStyle;
use crate::boundary::FeatureCollection;
use crate::color::HslColor;
use crate::density::DensitySurface;
use crate::model::{BaseLayer, LatLng, PlantingRecord, Tier};

/// Details shown when a marker is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub species: String,
    pub quantity: u32,
    pub planter: Option<String>,
    /// Location detail, village, tambon and district joined for display
    pub location: Option<String>,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub images: Vec<String>,
}

/// One planting record drawn as a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub record_id: String,
    pub position: LatLng,
    pub color: HslColor,
    pub popup: MarkerPopup,
}

impl Marker {
    pub fn new(record: &PlantingRecord, color: HslColor) -> Self {
        let location: Vec<&str> = [
            record.location_detail.as_deref(),
            record.village_name.as_deref(),
            record.tambon_name.as_deref(),
            record.district_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            record_id: record.id.clone(),
            position: record.position,
            color,
            popup: MarkerPopup {
                species: record.species_name.clone(),
                quantity: record.effective_quantity(),
                planter: record.planter_name.clone(),
                location: (!location.is_empty()).then(|| location.join(", ")),
                note: record.note.clone(),
                created_at: record.created_at,
                images: record.image_paths.clone(),
            },
        }
    }
}

/// One layer of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneLayer {
    Base {
        layer: BaseLayer,
        url: String,
    },
    Boundary {
        tier: Tier,
        collection: Arc<FeatureCollection>,
        style: BoundaryStyle,
    },
    Density(DensitySurface),
    Markers(Vec<Marker>),
}

impl SceneLayer {
    pub fn kind(&self) -> LayerKind {
        match self {
            SceneLayer::Base { .. } => LayerKind::Base,
            SceneLayer::Boundary { tier, .. } => LayerKind::Boundary(*tier),
            SceneLayer::Density(_) => LayerKind::Density,
            SceneLayer::Markers(_) => LayerKind::Markers,
        }
    }
}

/// Layer identity without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Base,
    Boundary(Tier),
    Density,
    Markers,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Base => write!(f, "base"),
            LayerKind::Boundary(tier) => write!(f, "{}", tier),
            LayerKind::Density => write!(f, "density"),
            LayerKind::Markers => write!(f, "markers"),
        }
    }
}

/// Ordered layers, bottom first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    layers: Vec<SceneLayer>,
}

impl Scene {
    pub(crate) fn new(layers: Vec<SceneLayer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(SceneLayer::kind).collect()
    }

    pub fn contains(&self, kind: LayerKind) -> bool {
        self.layers.iter().any(|l| l.kind() == kind)
    }

    /// Boundary tiers present, bottom first.
    pub fn boundary_tiers(&self) -> Vec<Tier> {
        self.layers
            .iter()
            .filter_map(|l| match l {
                SceneLayer::Boundary { tier, .. } => Some(*tier),
                _ => None,
            })
            .collect()
    }

    pub fn base(&self) -> Option<BaseLayer> {
        self.layers.iter().find_map(|l| match l {
            SceneLayer::Base { layer, .. } => Some(*layer),
            _ => None,
        })
    }

    pub fn density(&self) -> Option<&DensitySurface> {
        self.layers.iter().find_map(|l| match l {
            SceneLayer::Density(surface) => Some(surface),
            _ => None,
        })
    }

    /// Markers, or an empty slice if the marker layer is absent.
    pub fn markers(&self) -> &[Marker] {
        self.layers
            .iter()
            .find_map(|l| match l {
                SceneLayer::Markers(markers) => Some(markers.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }
}
