//! Planting records as returned by the persistence service.
//!
//! The persistence layer has shipped records in more than one shape over time
//! (flat `lat`/`lng` columns, a nested `position`, decimal columns serialised
//! as strings, image lists stored as JSON text). Rows are decoded through a
//! lenient raw form and normalised into [`PlantingRecord`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::region::LatLng;

/// Errors reading planting records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Payload was not valid JSON
    #[error("Invalid record payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload was JSON but not a list of records
    #[error("Record payload must be a JSON array, got {0}")]
    NotAList(&'static str),

    /// A row had no usable identifier
    #[error("Record is missing an id")]
    MissingId,

    /// A row had no usable coordinates
    #[error("Record {id} is missing coordinates")]
    MissingCoordinates { id: String },
}

/// A point-located planting event.
///
/// Administrative names are denormalised weak references: nothing ties them
/// to the names held by the boundary cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", rename_all = "camelCase")]
pub struct PlantingRecord {
    pub id: String,
    pub species_name: String,
    /// Number of trees planted. Expected to be >= 1 but not trusted.
    pub quantity: i64,
    pub position: LatLng,
    pub village_name: Option<String>,
    pub tambon_name: Option<String>,
    pub district_name: Option<String>,
    pub image_paths: Vec<String>,
    pub planter_name: Option<String>,
    /// Free-text directions to the planting site
    pub location_detail: Option<String>,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PlantingRecord {
    /// Create a record with the fields the engine cares about.
    pub fn new(
        id: impl Into<String>,
        species_name: impl Into<String>,
        quantity: i64,
        position: LatLng,
    ) -> Self {
        Self {
            id: id.into(),
            species_name: species_name.into(),
            quantity,
            position,
            village_name: None,
            tambon_name: None,
            district_name: None,
            image_paths: Vec::new(),
            planter_name: None,
            location_detail: None,
            note: None,
            created_at: None,
        }
    }

    /// Set the denormalised administrative names.
    pub fn with_location(
        mut self,
        district: Option<&str>,
        tambon: Option<&str>,
        village: Option<&str>,
    ) -> Self {
        self.district_name = district.map(str::to_string);
        self.tambon_name = tambon.map(str::to_string);
        self.village_name = village.map(str::to_string);
        self
    }

    /// Set the planter's display name.
    pub fn with_planter(mut self, planter: impl Into<String>) -> Self {
        self.planter_name = Some(planter.into());
        self
    }

    /// Quantity clamped to at least one tree.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.clamp(1, u32::MAX as i64) as u32
    }
}

/// Lenient row shape accepted from the persistence service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    id: Value,
    #[serde(default, alias = "tree_name", alias = "treeName")]
    species_name: Option<String>,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    position: Option<LatLng>,
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lng: Value,
    #[serde(default, alias = "village_name")]
    village_name: Option<String>,
    #[serde(default, alias = "tambon_name")]
    tambon_name: Option<String>,
    #[serde(default, alias = "district_name")]
    district_name: Option<String>,
    #[serde(default, alias = "image_paths", alias = "images")]
    image_paths: Value,
    #[serde(default, alias = "planter_name")]
    planter_name: Option<String>,
    #[serde(default, alias = "location_detail")]
    location_detail: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default, alias = "created_at")]
    created_at: Option<String>,
}

impl TryFrom<RawRecord> for PlantingRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let id = match &raw.id {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(RecordError::MissingId),
        };

        let position = match raw.position {
            Some(position) => position,
            None => match (number(&raw.lat), number(&raw.lng)) {
                (Some(lat), Some(lng)) => LatLng::new(lat, lng),
                _ => return Err(RecordError::MissingCoordinates { id }),
            },
        };

        Ok(PlantingRecord {
            id,
            species_name: raw
                .species_name
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            quantity: number(&raw.quantity).map(|q| q as i64).unwrap_or(1),
            position,
            village_name: non_empty(raw.village_name),
            tambon_name: non_empty(raw.tambon_name),
            district_name: non_empty(raw.district_name),
            image_paths: image_paths(&raw.image_paths),
            planter_name: non_empty(raw.planter_name),
            location_detail: non_empty(raw.location_detail),
            note: non_empty(raw.note),
            created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        })
    }
}

/// Decode the persistence service's flat record list.
///
/// Rows that cannot be read as records are skipped with a warning; only a
/// payload that is not a list at all is an error.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<PlantingRecord>, RecordError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(_) => return Err(RecordError::NotAList("object")),
        Value::String(_) => return Err(RecordError::NotAList("string")),
        _ => return Err(RecordError::NotAList("scalar")),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<PlantingRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index, error = %e, "Skipping unreadable planting record"),
        }
    }
    Ok(records)
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn image_paths(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        // Stored as JSON text in a TEXT column
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(inner @ Value::Array(_)) => image_paths(&inner),
            _ if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
