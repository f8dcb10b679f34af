//! Render command: compose the map scene for a records file and describe it.
//!
//! Boundaries are loaded from the configured source (or a directory given on
//! the command line), records are filtered, and the resulting layer stack is
//! printed bottom first.

use std::path::PathBuf;

use clap::Args;
use plantmap::boundary::TierState;
use plantmap::composer::{LayerComposer, SceneLayer};
use plantmap::config::ConfigFile;
use plantmap::model::{LayerToggle, Tier};
use serde_json::json;
use tracing::{info, warn};

use super::common::{load_records, ConfiguredSource};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON file holding the planting records
    #[arg(long)]
    pub records: PathBuf,

    /// Read boundaries from <dir>/{districts,tambons,villages}.geojson
    #[arg(long, value_name = "DIR")]
    pub boundaries_dir: Option<PathBuf>,

    /// Show only these species (repeatable)
    #[arg(long = "species", value_name = "NAME")]
    pub species: Vec<String>,

    /// Show only records in this district
    #[arg(long)]
    pub district: Option<String>,

    /// Show only records in this tambon (requires --district)
    #[arg(long, requires = "district")]
    pub tambon: Option<String>,

    /// Add the density surface
    #[arg(long)]
    pub heatmap: bool,

    /// Use satellite base tiles
    #[arg(long)]
    pub satellite: bool,

    #[arg(long)]
    pub hide_districts: bool,

    #[arg(long)]
    pub hide_tambons: bool,

    #[arg(long)]
    pub hide_villages: bool,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RenderArgs, config: &ConfigFile) -> Result<(), CliError> {
    let records = load_records(&args.records)?;
    let source = ConfiguredSource::from_config(config, args.boundaries_dir.clone())?;
    let (mut composer, _events) =
        LayerComposer::new(source, config.map.context(), config.composer_options());

    let report = composer.load_boundaries().await;
    for (tier, error) in report.failed() {
        warn!(tier = %tier, error = %error, "Boundary tier unavailable");
    }

    composer.attach();
    composer.set_records(records);
    composer.set_visible(LayerToggle::Boundary(Tier::District), !args.hide_districts);
    composer.set_visible(LayerToggle::Boundary(Tier::Tambon), !args.hide_tambons);
    composer.set_visible(LayerToggle::Boundary(Tier::Village), !args.hide_villages);
    composer.set_visible(LayerToggle::Satellite, args.satellite);
    composer.set_visible(LayerToggle::Heatmap, args.heatmap);
    composer.update_filter(|filter| {
        filter.select_species(args.species.iter().cloned());
        filter.select_district(args.district.clone());
        filter.select_tambon(args.tambon.clone());
    });

    let focus = match (&args.district, &args.tambon) {
        (Some(_), Some(tambon)) => Some((Tier::Tambon, tambon)),
        (Some(district), None) => Some((Tier::District, district)),
        _ => None,
    };
    if let Some((tier, name)) = focus {
        if !composer.focus_region(tier, name) {
            warn!(tier = %tier, region = %name, "No boundary to focus on");
        }
    }

    let scene = composer.scene();
    info!(layers = scene.layers().len(), "Scene composed");

    if args.json {
        let layers: Vec<_> = scene.layers().iter().map(layer_json).collect();
        let tiers: serde_json::Map<_, _> = Tier::ALL
            .iter()
            .map(|tier| (tier.to_string(), json!(state_label(&composer.tier_state(*tier)))))
            .collect();
        let center = composer.context().center();
        let output = json!({
            "view": {
                "lat": center.lat,
                "lng": center.lng,
                "zoom": composer.context().zoom(),
            },
            "layers": layers,
            "boundaries": tiers,
            "summary": composer.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "View: {} at zoom {}",
        composer.context().center(),
        composer.context().zoom()
    );
    println!();
    println!("Layers (bottom first):");
    for layer in scene.layers() {
        println!("  {}", describe_layer(layer));
    }

    println!();
    println!("Boundaries:");
    for tier in Tier::ALL {
        println!("  {:<10} {}", tier, state_label(&composer.tier_state(tier)));
    }

    let summary = composer.summary();
    let total = composer.records().map_or(0, |r| r.len());
    println!();
    println!(
        "Showing {} of {} records ({} trees, {} species)",
        summary.total_records, total, summary.total_quantity, summary.unique_species
    );
    Ok(())
}

fn state_label(state: &TierState) -> String {
    match state {
        TierState::Pending => "pending".to_string(),
        TierState::Absent => "unavailable".to_string(),
        TierState::Ready(collection) => format!("{} features", collection.len()),
    }
}

fn describe_layer(layer: &SceneLayer) -> String {
    match layer {
        SceneLayer::Base { layer, url } => format!("base       {} ({})", layer, url),
        SceneLayer::Boundary {
            tier,
            collection,
            style,
        } => format!(
            "{:<10} {} features, {} weight {}",
            tier.to_string(),
            collection.len(),
            style.color,
            style.weight
        ),
        SceneLayer::Density(surface) => format!(
            "density    {} points, total weight {}",
            surface.points().len(),
            surface.total_weight()
        ),
        SceneLayer::Markers(markers) => format!("markers    {} markers", markers.len()),
    }
}

fn layer_json(layer: &SceneLayer) -> serde_json::Value {
    match layer {
        SceneLayer::Base { layer, url } => json!({
            "kind": "base",
            "layer": layer.to_string(),
            "url": url,
        }),
        SceneLayer::Boundary {
            tier, collection, ..
        } => json!({
            "kind": "boundary",
            "tier": tier.to_string(),
            "features": collection.len(),
        }),
        SceneLayer::Density(surface) => json!({
            "kind": "density",
            "points": surface.points(),
            "options": {
                "radius": surface.options().radius,
                "blur": surface.options().blur,
                "max_zoom": surface.options().max_zoom,
            },
        }),
        SceneLayer::Markers(markers) => json!({
            "kind": "markers",
            "markers": markers
                .iter()
                .map(|m| json!({
                    "id": m.record_id,
                    "lat": m.position.lat,
                    "lng": m.position.lng,
                    "color": m.color.to_hex(),
                    "species": m.popup.species,
                    "quantity": m.popup.quantity,
                }))
                .collect::<Vec<_>>(),
        }),
    }
}
