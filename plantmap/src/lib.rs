//! PlantMap - planting records over administrative boundaries
//!
//! This library is the map engine behind a tree-planting tracker: it loads
//! district, tambon and village boundaries, filters planting records, derives
//! a density surface, routes clicks during location selection and composes
//! everything into an ordered scene.
//!
//! # High-Level API
//!
//! [`composer::LayerComposer`] ties the pieces together:
//!
//! ```ignore
//! use plantmap::boundary::HttpBoundarySource;
//! use plantmap::composer::{ComposerOptions, LayerComposer, MapContext};
//!
//! let source = HttpBoundarySource::new(base_url, Default::default(), timeout)?;
//! let (mut composer, mut events) =
//!     LayerComposer::new(source, MapContext::default(), ComposerOptions::default());
//!
//! composer.load_boundaries().await;
//! composer.set_records(records);
//! composer.attach();
//! let scene = composer.scene();
//! ```

pub mod boundary;
pub mod color;
pub mod composer;
pub mod config;
pub mod density;
pub mod filter;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod stats;

/// Version of the PlantMap library and CLI.
///
/// Defined in `Cargo.toml` and shared across the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
