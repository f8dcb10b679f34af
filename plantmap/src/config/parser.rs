//! INI parsing: `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names map to struct fields.
//! Parsing starts from the defaults and overlays whatever the file sets.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::defaults::MAX_ZOOM;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` into a `ConfigFile`.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("boundaries")) {
        let s = Section::new("boundaries", section);
        if let Some(v) = s.parse("source", "must be 'http' or 'directory'")? {
            config.boundaries.source = v;
        }
        if let Some(v) = s.text("base_url") {
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(s.invalid("base_url", &v, "must start with http:// or https://"));
            }
            config.boundaries.base_url = v;
        }
        if let Some(v) = s.text("directory") {
            config.boundaries.directory = Some(expand_tilde(&v));
        }
        if let Some(v) = s.text("districts_path") {
            config.boundaries.districts_path = v;
        }
        if let Some(v) = s.text("tambons_path") {
            config.boundaries.tambons_path = v;
        }
        if let Some(v) = s.text("villages_path") {
            config.boundaries.villages_path = v;
        }
        if let Some(v) = s.parse::<u64>("timeout", "must be a positive integer (seconds)")? {
            if v == 0 {
                return Err(s.invalid("timeout", "0", "must be a positive integer (seconds)"));
            }
            config.boundaries.timeout = v;
        }
    }

    if let Some(section) = ini.section(Some("map")) {
        let s = Section::new("map", section);
        if let Some(v) = s.parse::<f64>("center_lat", "must be a latitude in degrees")? {
            if !(-90.0..=90.0).contains(&v) {
                return Err(s.invalid("center_lat", &v.to_string(), "must be within -90..=90"));
            }
            config.map.center_lat = v;
        }
        if let Some(v) = s.parse::<f64>("center_lng", "must be a longitude in degrees")? {
            if !(-180.0..=180.0).contains(&v) {
                return Err(s.invalid("center_lng", &v.to_string(), "must be within -180..=180"));
            }
            config.map.center_lng = v;
        }
        if let Some(v) = s.parse::<u8>("zoom", "must be an integer zoom level")? {
            if v > MAX_ZOOM {
                return Err(s.invalid("zoom", &v.to_string(), "must be at most 19"));
            }
            config.map.zoom = v;
        }
        if let Some(v) = s.text("street_tiles") {
            config.map.street_tiles = v;
        }
        if let Some(v) = s.text("satellite_tiles") {
            config.map.satellite_tiles = v;
        }
    }

    if let Some(section) = ini.section(Some("colors")) {
        let s = Section::new("colors", section);
        if let Some(v) = s.percent("saturation")? {
            config.colors.saturation = v;
        }
        if let Some(v) = s.percent("lightness")? {
            config.colors.lightness = v;
        }
    }

    if let Some(section) = ini.section(Some("density")) {
        let s = Section::new("density", section);
        if let Some(v) = s.parse("radius", "must be a positive integer (pixels)")? {
            config.density.radius = v;
        }
        if let Some(v) = s.parse("blur", "must be a non-negative integer (pixels)")? {
            config.density.blur = v;
        }
        if let Some(v) = s.parse::<u8>("max_zoom", "must be an integer zoom level")? {
            if v > MAX_ZOOM {
                return Err(s.invalid("max_zoom", &v.to_string(), "must be at most 19"));
            }
            config.density.max_zoom = v;
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        let s = Section::new("logging", section);
        if let Some(v) = s.text("directory") {
            config.logging.directory = expand_tilde(&v);
        }
        if let Some(v) = s.text("file") {
            config.logging.file = v;
        }
    }

    Ok(config)
}

/// One INI section with error context.
struct Section<'a> {
    name: &'static str,
    props: &'a Properties,
}

impl<'a> Section<'a> {
    fn new(name: &'static str, props: &'a Properties) -> Self {
        Self { name, props }
    }

    /// Trimmed value, `None` if missing or blank.
    fn text(&self, key: &str) -> Option<String> {
        self.props
            .get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn parse<T: FromStr>(&self, key: &str, reason: &str) -> Result<Option<T>, ConfigFileError> {
        match self.text(key) {
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(key, &v, reason)),
            None => Ok(None),
        }
    }

    fn percent(&self, key: &str) -> Result<Option<u8>, ConfigFileError> {
        const REASON: &str = "must be a percentage between 0 and 100";
        match self.parse::<u8>(key, REASON)? {
            Some(v) if v > 100 => Err(self.invalid(key, &v.to_string(), REASON)),
            other => Ok(other),
        }
    }

    fn invalid(&self, key: &str, value: &str, reason: &str) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
