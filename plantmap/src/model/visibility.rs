//! Layer visibility flags.

use std::fmt;
use std::str::FromStr;

use super::region::Tier;

/// Independent layer visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    pub districts: bool,
    pub tambons: bool,
    pub villages: bool,
    /// Selects the satellite base tiles instead of the street map.
    pub satellite: bool,
    pub heatmap: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self {
            districts: true,
            tambons: true,
            villages: true,
            satellite: false,
            heatmap: false,
        }
    }
}

/// A toggleable visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerToggle {
    Boundary(Tier),
    Satellite,
    Heatmap,
}

impl FromStr for LayerToggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "satellite" => Ok(LayerToggle::Satellite),
            "heatmap" => Ok(LayerToggle::Heatmap),
            other => other
                .parse::<Tier>()
                .map(LayerToggle::Boundary)
                .map_err(|_| format!("unknown layer '{}'", other)),
        }
    }
}

/// Base tile source. The two choices are exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseLayer {
    Street,
    Satellite,
}

impl fmt::Display for BaseLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseLayer::Street => write!(f, "street"),
            BaseLayer::Satellite => write!(f, "satellite"),
        }
    }
}

impl VisibilityState {
    /// Read a flag.
    pub fn is_visible(&self, layer: LayerToggle) -> bool {
        match layer {
            LayerToggle::Boundary(Tier::District) => self.districts,
            LayerToggle::Boundary(Tier::Tambon) => self.tambons,
            LayerToggle::Boundary(Tier::Village) => self.villages,
            LayerToggle::Satellite => self.satellite,
            LayerToggle::Heatmap => self.heatmap,
        }
    }

    /// Write a flag.
    pub fn set(&mut self, layer: LayerToggle, visible: bool) {
        let flag = match layer {
            LayerToggle::Boundary(Tier::District) => &mut self.districts,
            LayerToggle::Boundary(Tier::Tambon) => &mut self.tambons,
            LayerToggle::Boundary(Tier::Village) => &mut self.villages,
            LayerToggle::Satellite => &mut self.satellite,
            LayerToggle::Heatmap => &mut self.heatmap,
        };
        *flag = visible;
    }

    /// Flip a flag, returning its new value.
    pub fn toggle(&mut self, layer: LayerToggle) -> bool {
        let visible = !self.is_visible(layer);
        self.set(layer, visible);
        visible
    }

    /// Base tile source implied by the satellite flag.
    pub fn base_layer(&self) -> BaseLayer {
        if self.satellite {
            BaseLayer::Satellite
        } else {
            BaseLayer::Street
        }
    }
}
