//! Settings structs, one per `[section]` of config.ini.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::boundary::BoundaryEndpoints;
use crate::color::ColorAssigner;
use crate::composer::{BaseTiles, ComposerOptions, LayerStyles, MapContext};
use crate::density::DensityOptions;
use crate::model::LatLng;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub boundaries: BoundarySettings,
    pub map: MapSettings,
    pub colors: ColorSettings,
    pub density: DensitySettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Presentation options for a composer.
    pub fn composer_options(&self) -> ComposerOptions {
        ComposerOptions {
            colors: self.colors.assigner(),
            styles: LayerStyles::default(),
            density: self.density.options(),
        }
    }
}

/// Where boundary geometry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySourceKind {
    /// Boundary data service over HTTP
    Http,
    /// `<directory>/<tier>.geojson` files
    Directory,
}

impl FromStr for BoundarySourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(BoundarySourceKind::Http),
            "directory" | "dir" => Ok(BoundarySourceKind::Directory),
            other => Err(format!("unknown boundary source '{}'", other)),
        }
    }
}

impl fmt::Display for BoundarySourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundarySourceKind::Http => write!(f, "http"),
            BoundarySourceKind::Directory => write!(f, "directory"),
        }
    }
}

/// `[boundaries]`
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySettings {
    pub source: BoundarySourceKind,
    /// Base URL of the boundary data service
    pub base_url: String,
    /// Directory of GeoJSON files (directory source only)
    pub directory: Option<PathBuf>,
    pub districts_path: String,
    pub tambons_path: String,
    pub villages_path: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl BoundarySettings {
    pub fn endpoints(&self) -> BoundaryEndpoints {
        BoundaryEndpoints {
            districts: self.districts_path.clone(),
            tambons: self.tambons_path.clone(),
            villages: self.villages_path.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// `[map]`
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub street_tiles: String,
    pub satellite_tiles: String,
}

impl MapSettings {
    /// A not-yet-attached context with this view and tile set.
    pub fn context(&self) -> MapContext {
        MapContext::new(
            LatLng::new(self.center_lat, self.center_lng),
            self.zoom,
            BaseTiles {
                street: self.street_tiles.clone(),
                satellite: self.satellite_tiles.clone(),
            },
        )
    }
}

/// `[colors]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSettings {
    pub saturation: u8,
    pub lightness: u8,
}

impl ColorSettings {
    pub fn assigner(&self) -> ColorAssigner {
        ColorAssigner::new(self.saturation, self.lightness)
    }
}

/// `[density]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensitySettings {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
}

impl DensitySettings {
    pub fn options(&self) -> DensityOptions {
        DensityOptions {
            radius: self.radius,
            blur: self.blur,
            max_zoom: self.max_zoom,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}
