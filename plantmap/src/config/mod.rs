//! User configuration stored in `~/.plantmap/config.ini`.
//!
//! ```ini
//! [boundaries]
//! source = http
//! base_url = http://localhost:3000
//!
//! [map]
//! center_lat = 6.6238
//! center_lng = 99.95
//! zoom = 10
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_BOUNDARY_TIMEOUT_SECS, DEFAULT_DISTRICTS_PATH,
    DEFAULT_TAMBONS_PATH, DEFAULT_VILLAGES_PATH, MAX_ZOOM,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    BoundarySettings, BoundarySourceKind, ColorSettings, ConfigFile, DensitySettings,
    LoggingSettings, MapSettings,
};
