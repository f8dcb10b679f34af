//! Pointer input and selection output types.

use std::fmt;

use serde_json::{Map, Value};

use crate::model::{LatLng, Tier};

/// Whether pointer input currently selects a planting location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Idle,
    PointSelect,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Idle => write!(f, "idle"),
            SelectionMode::PointSelect => write!(f, "point-select"),
        }
    }
}

/// Identifies one physical gesture (one click).
///
/// The rendering library delivers a feature-level event and then a map-level
/// event for the same click; both carry the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

/// A boundary feature under the pointer, as hit-tested by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureHit {
    pub tier: Tier,
    pub properties: Map<String, Value>,
}

impl FeatureHit {
    pub fn new(tier: Tier, properties: Map<String, Value>) -> Self {
        Self { tier, properties }
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// What a pointer event landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// Bare map, no feature hit
    Map,
    /// A boundary feature
    Feature(FeatureHit),
}

/// One pointer click delivered by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub gesture: GestureId,
    pub position: LatLng,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn map_click(gesture: GestureId, position: LatLng) -> Self {
        Self {
            gesture,
            position,
            target: PointerTarget::Map,
        }
    }

    pub fn feature_click(gesture: GestureId, position: LatLng, hit: FeatureHit) -> Self {
        Self {
            gesture,
            position,
            target: PointerTarget::Feature(hit),
        }
    }
}

/// Administrative names extracted from a clicked boundary.
///
/// Which names are present follows the tier: a village supplies all three,
/// a tambon supplies tambon and district, a district only itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdministrativeAttributes {
    pub district_name: Option<String>,
    pub tambon_name: Option<String>,
    pub village_name: Option<String>,
}

impl AdministrativeAttributes {
    /// Extract the names a feature of `hit.tier` carries.
    pub fn from_hit(hit: &FeatureHit) -> Self {
        let name = hit.property("name");
        match hit.tier {
            Tier::District => Self {
                district_name: name,
                ..Self::default()
            },
            Tier::Tambon => Self {
                district_name: hit.property("districtName"),
                tambon_name: name,
                village_name: None,
            },
            Tier::Village => Self {
                district_name: hit.property("districtName"),
                tambon_name: hit.property("tambonName"),
                village_name: name,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.district_name.is_none() && self.tambon_name.is_none() && self.village_name.is_none()
    }
}

/// Outcome of a pointer gesture in point-select mode.
///
/// Exactly one of these is emitted per handled gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    PositionChosen(LatLng),
    BoundaryAttributesExtracted {
        tier: Tier,
        attributes: AdministrativeAttributes,
    },
}
