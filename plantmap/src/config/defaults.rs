//! Default values for every setting and `ConfigFile::default()`.

use super::file::config_directory;
use super::settings::*;
use crate::color::{DEFAULT_LIGHTNESS, DEFAULT_SATURATION};
use crate::composer::{DEFAULT_CENTER, DEFAULT_ZOOM, SATELLITE_TILES, STREET_TILES};
use crate::density::{DEFAULT_BLUR, DEFAULT_MAX_ZOOM, DEFAULT_RADIUS};
use crate::logging::default_log_file;

/// Default boundary data service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default endpoint paths per tier.
pub const DEFAULT_DISTRICTS_PATH: &str = "/api/polygons/districts";
pub const DEFAULT_TAMBONS_PATH: &str = "/api/polygons/tambons";
pub const DEFAULT_VILLAGES_PATH: &str = "/api/polygons/villages";

/// Default boundary request timeout in seconds.
pub const DEFAULT_BOUNDARY_TIMEOUT_SECS: u64 = 30;

/// Highest zoom offered by the tile sources.
pub const MAX_ZOOM: u8 = 19;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            boundaries: BoundarySettings {
                source: BoundarySourceKind::Http,
                base_url: DEFAULT_BASE_URL.to_string(),
                directory: None,
                districts_path: DEFAULT_DISTRICTS_PATH.to_string(),
                tambons_path: DEFAULT_TAMBONS_PATH.to_string(),
                villages_path: DEFAULT_VILLAGES_PATH.to_string(),
                timeout: DEFAULT_BOUNDARY_TIMEOUT_SECS,
            },
            map: MapSettings {
                center_lat: DEFAULT_CENTER.lat,
                center_lng: DEFAULT_CENTER.lng,
                zoom: DEFAULT_ZOOM,
                street_tiles: STREET_TILES.to_string(),
                satellite_tiles: SATELLITE_TILES.to_string(),
            },
            colors: ColorSettings {
                saturation: DEFAULT_SATURATION,
                lightness: DEFAULT_LIGHTNESS,
            },
            density: DensitySettings {
                radius: DEFAULT_RADIUS,
                blur: DEFAULT_BLUR,
                max_zoom: DEFAULT_MAX_ZOOM,
            },
            logging: LoggingSettings {
                directory: config_directory().join("logs"),
                file: default_log_file().to_string(),
            },
        }
    }
}
