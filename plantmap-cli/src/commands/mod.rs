//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`color`] - Marker color for species names
//! - [`config`] - Configuration management (path, show, init)
//! - [`render`] - Compose the map scene for a records file
//! - [`stats`] - Species breakdown and totals

pub mod color;
pub mod common;
pub mod config;
pub mod render;
pub mod stats;
