//! INI serialization: `ConfigFile` → commented config.ini text.

use std::path::Path;

use super::settings::ConfigFile;

/// Render `config` as a commented INI document.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let directory = config
        .boundaries
        .directory
        .as_deref()
        .map(path_to_string)
        .unwrap_or_default();

    format!(
        r#"[boundaries]
; Where administrative boundaries come from:
;   http      - boundary data service at base_url
;   directory - districts.geojson, tambons.geojson and villages.geojson in directory
source = {source}
base_url = {base_url}
directory = {directory}
; Endpoint paths, relative to base_url
districts_path = {districts}
tambons_path = {tambons}
villages_path = {villages}
; Request timeout in seconds (default: 30)
timeout = {timeout}

[map]
; Initial view (default: Satun, 6.6238 / 99.95 at zoom 10)
center_lat = {lat}
center_lng = {lng}
zoom = {zoom}
; Base tile URL templates
street_tiles = {street}
satellite_tiles = {satellite}

[colors]
; Species marker colors: hue comes from the species name,
; saturation and lightness are fixed percentages
saturation = {saturation}
lightness = {lightness}

[density]
; Heatmap kernel radius and blur in pixels, and the zoom of full intensity
radius = {radius}
blur = {blur}
max_zoom = {max_zoom}

[logging]
directory = {log_dir}
file = {log_file}
"#,
        source = config.boundaries.source,
        base_url = config.boundaries.base_url,
        directory = directory,
        districts = config.boundaries.districts_path,
        tambons = config.boundaries.tambons_path,
        villages = config.boundaries.villages_path,
        timeout = config.boundaries.timeout,
        lat = config.map.center_lat,
        lng = config.map.center_lng,
        zoom = config.map.zoom,
        street = config.map.street_tiles,
        satellite = config.map.satellite_tiles,
        saturation = config.colors.saturation,
        lightness = config.colors.lightness,
        radius = config.density.radius,
        blur = config.density.blur,
        max_zoom = config.density.max_zoom,
        log_dir = path_to_string(&config.logging.directory),
        log_file = config.logging.file,
    )
}

/// Display a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
