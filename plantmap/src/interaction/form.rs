//! Location form fed by selection events.

use super::event::{AdministrativeAttributes, SelectionEvent};
use crate::model::LatLng;

/// Location fields of the record entry form.
///
/// Extracted boundary attributes only fill fields that are still empty, so a
/// name typed by hand is never overwritten by a later click.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationForm {
    pub position: Option<LatLng>,
    pub district_name: String,
    pub tambon_name: String,
    pub village_name: String,
}

impl LocationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one selection event. Returns the names of the fields changed.
    pub fn apply(&mut self, event: &SelectionEvent) -> Vec<&'static str> {
        match event {
            SelectionEvent::PositionChosen(position) => {
                self.position = Some(*position);
                vec!["position"]
            }
            SelectionEvent::BoundaryAttributesExtracted { attributes, .. } => {
                self.merge(attributes)
            }
        }
    }

    fn merge(&mut self, attributes: &AdministrativeAttributes) -> Vec<&'static str> {
        let mut filled = Vec::new();
        if fill_if_empty(&mut self.district_name, attributes.district_name.as_deref()) {
            filled.push("district");
        }
        if fill_if_empty(&mut self.tambon_name, attributes.tambon_name.as_deref()) {
            filled.push("tambon");
        }
        if fill_if_empty(&mut self.village_name, attributes.village_name.as_deref()) {
            filled.push("village");
        }
        filled
    }

    /// Hand edit of the district field.
    pub fn set_district(&mut self, value: impl Into<String>) {
        self.district_name = value.into();
    }

    /// Hand edit of the tambon field.
    pub fn set_tambon(&mut self, value: impl Into<String>) {
        self.tambon_name = value.into();
    }

    /// Hand edit of the village field.
    pub fn set_village(&mut self, value: impl Into<String>) {
        self.village_name = value.into();
    }

    /// Clear everything, e.g. after submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn fill_if_empty(field: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(value) if field.trim().is_empty() => {
            *field = value.to_string();
            true
        }
        _ => false,
    }
}
