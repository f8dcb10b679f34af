//! Boundary layer styles.

use crate::model::Tier;

/// Stroke and fill of one boundary tier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryStyle {
    /// Stroke color as `#rrggbb`
    pub color: String,
    pub weight: u8,
    pub fill_opacity: f32,
    /// Dash pattern, if the stroke is dashed
    pub dash_array: Option<String>,
}

impl BoundaryStyle {
    fn solid(color: &str, weight: u8, fill_opacity: f32) -> Self {
        Self {
            color: color.to_string(),
            weight,
            fill_opacity,
            dash_array: None,
        }
    }
}

/// Styles for all three tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyles {
    pub districts: BoundaryStyle,
    pub tambons: BoundaryStyle,
    pub villages: BoundaryStyle,
}

impl Default for LayerStyles {
    fn default() -> Self {
        Self {
            districts: BoundaryStyle::solid("#1d4ed8", 2, 0.05),
            tambons: BoundaryStyle::solid("#16a34a", 1, 0.05),
            villages: BoundaryStyle {
                dash_array: Some("4 4".to_string()),
                ..BoundaryStyle::solid("#ea580c", 1, 0.1)
            },
        }
    }
}

impl LayerStyles {
    pub fn for_tier(&self, tier: Tier) -> &BoundaryStyle {
        match tier {
            Tier::District => &self.districts,
            Tier::Tambon => &self.tambons,
            Tier::Village => &self.villages,
        }
    }
}
