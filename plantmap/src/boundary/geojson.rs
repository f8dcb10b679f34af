//! Feature collection validation.
//!
//! The boundary service has returned payloads of several shapes: a proper
//! `FeatureCollection`, an `{ "error": ... }` object on failure, and features
//! whose geometry is an object in some rows and a JSON-encoded string in
//! others. All classification happens here so callers only ever see a typed
//! [`FeatureCollection`] or a [`FetchError`].

use geo::{BoundingRect, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use super::error::{FeatureDefect, FetchError};
use crate::model::{AdministrativeRegion, GeoBounds, Geometry, Tier};

/// A boundary feature that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

impl BoundaryFeature {
    /// String property, if present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Region name. Always present on a validated feature.
    pub fn name(&self) -> &str {
        self.property("name").unwrap_or_default()
    }

    /// View this feature as an administrative region of `tier`.
    pub fn to_region(&self, tier: Tier) -> AdministrativeRegion {
        AdministrativeRegion {
            name: self.name().to_string(),
            tier,
            parent_name: tier
                .parent_key()
                .and_then(|key| self.property(key))
                .map(str::to_string),
            boundary: self.geometry.clone(),
        }
    }
}

/// Validated boundary geometry for one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    tier: Tier,
    features: Vec<BoundaryFeature>,
}

impl FeatureCollection {
    /// Build a collection from already validated features.
    pub fn new(tier: Tier, features: Vec<BoundaryFeature>) -> Self {
        Self { tier, features }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features as administrative regions.
    pub fn regions(&self) -> impl Iterator<Item = AdministrativeRegion> + '_ {
        self.features.iter().map(|f| f.to_region(self.tier))
    }

    /// Bounding box of every feature.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let polygons: Vec<Polygon<f64>> = self
            .features
            .iter()
            .flat_map(|f| f.geometry.polygons().iter().cloned())
            .collect();
        MultiPolygon::new(polygons).bounding_rect()
    }

    /// First feature named `name`.
    pub fn find(&self, name: &str) -> Option<&BoundaryFeature> {
        self.features.iter().find(|f| f.name() == name)
    }
}

/// A collection plus the features dropped while validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCollection {
    pub collection: FeatureCollection,
    pub defects: Vec<FeatureDefect>,
}

/// Parse and validate a raw payload.
pub fn parse_feature_collection(
    tier: Tier,
    bytes: &[u8],
) -> Result<ValidatedCollection, FetchError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| FetchError::InvalidJson {
        tier,
        message: e.to_string(),
    })?;
    validate_feature_collection(tier, value)
}

/// Validate an already parsed payload.
pub fn validate_feature_collection(
    tier: Tier,
    value: Value,
) -> Result<ValidatedCollection, FetchError> {
    let malformed = |reason: String| FetchError::Malformed { tier, reason };

    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(malformed(format!(
                "expected an object, got {}",
                json_kind(&other)
            )))
        }
    };

    match root.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {}
        Some(other) => return Err(malformed(format!("unexpected type tag '{}'", other))),
        None => {
            let reason = match root.get("error") {
                Some(error) => format!("service error payload: {}", error),
                None => "missing type tag".to_string(),
            };
            return Err(malformed(reason));
        }
    }

    let features = match root.remove("features") {
        Some(Value::Array(features)) => features,
        Some(other) => {
            return Err(malformed(format!(
                "features must be an array, got {}",
                json_kind(&other)
            )))
        }
        None => return Err(malformed("missing features array".to_string())),
    };

    let mut valid = Vec::with_capacity(features.len());
    let mut defects = Vec::new();
    for (index, feature) in features.into_iter().enumerate() {
        match validate_feature(tier, index, feature) {
            Ok(feature) => valid.push(feature),
            Err(defect) => defects.push(defect),
        }
    }

    Ok(ValidatedCollection {
        collection: FeatureCollection::new(tier, valid),
        defects,
    })
}

fn validate_feature(
    tier: Tier,
    index: usize,
    feature: Value,
) -> Result<BoundaryFeature, FeatureDefect> {
    let Value::Object(mut feature) = feature else {
        return Err(FeatureDefect::NotAFeature { index });
    };
    if let Some(tag) = feature.get("type") {
        if tag.as_str() != Some("Feature") {
            return Err(FeatureDefect::NotAFeature { index });
        }
    }

    let geometry = feature
        .get("geometry")
        .ok_or_else(|| "geometry is missing".to_string())
        .and_then(parse_geometry)
        .map_err(|reason| FeatureDefect::MalformedGeometry { index, reason })?;

    let properties = match feature.remove("properties") {
        Some(Value::Object(properties)) => properties,
        _ => Map::new(),
    };
    for key in tier.required_keys() {
        let present = properties
            .get(*key)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.trim().is_empty());
        if !present {
            return Err(FeatureDefect::MissingProperty { index, key: *key });
        }
    }

    Ok(BoundaryFeature {
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    match value {
        Value::Object(_) => geometry_from_object(value),
        // Some database drivers hand back ST_AsGeoJSON output as text
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner @ Value::Object(_)) => geometry_from_object(&inner),
            Ok(other) => Err(format!(
                "embedded geometry is {}, not an object",
                json_kind(&other)
            )),
            Err(e) => Err(format!("embedded geometry is not JSON: {}", e)),
        },
        other => Err(format!("geometry is {}", json_kind(other))),
    }
}

fn geometry_from_object(value: &Value) -> Result<Geometry, String> {
    let coordinates = value
        .get("coordinates")
        .ok_or_else(|| "coordinates are missing".to_string())?;
    match value.get("type").and_then(Value::as_str) {
        Some("Polygon") => parse_polygon(coordinates).map(Geometry::Polygon),
        Some("MultiPolygon") => {
            let parts = coordinates
                .as_array()
                .ok_or_else(|| "MultiPolygon coordinates must be an array".to_string())?;
            if parts.is_empty() {
                return Err("MultiPolygon has no parts".to_string());
            }
            parts
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>, _>>()
                .map(|parts| Geometry::MultiPolygon(MultiPolygon::new(parts)))
        }
        Some(other) => Err(format!("unsupported geometry type '{}'", other)),
        None => Err("geometry type tag is missing".to_string()),
    }
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>, String> {
    let rings = value
        .as_array()
        .ok_or_else(|| "polygon must be an array of rings".to_string())?;
    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings
        .next()
        .ok_or_else(|| "polygon has no rings".to_string())??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> Result<LineString<f64>, String> {
    let positions = value
        .as_array()
        .ok_or_else(|| "ring must be an array of positions".to_string())?;
    // A linear ring is closed: at least three distinct points plus the closing one
    if positions.len() < 4 {
        return Err(format!("ring has {} positions, need 4", positions.len()));
    }
    positions
        .iter()
        .map(|position| {
            let pair = position
                .as_array()
                .filter(|p| p.len() >= 2)
                .ok_or_else(|| "position must be [lng, lat]".to_string())?;
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lng), Some(lat)) => Ok([lng, lat]),
                _ => Err("position values must be numbers".to_string()),
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::from)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
