//! Stats command: species breakdown and totals for a records file.

use std::path::PathBuf;

use clap::Args;
use plantmap::filter;
use plantmap::model::FilterState;
use plantmap::stats::{share_slices, species_stats, summarize, DEFAULT_SLICE_LIMIT};
use serde_json::json;

use super::common::load_records;
use crate::error::CliError;

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// JSON file holding the planting records
    #[arg(long)]
    pub records: PathBuf,

    /// Only count records in this district
    #[arg(long)]
    pub district: Option<String>,

    /// Only count records in this tambon (requires --district)
    #[arg(long, requires = "district")]
    pub tambon: Option<String>,

    /// Number of species shown in the share breakdown
    #[arg(long, default_value_t = DEFAULT_SLICE_LIMIT)]
    pub limit: usize,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> Result<(), CliError> {
    let records = load_records(&args.records)?;

    let mut filter_state = FilterState::new();
    filter_state.select_district(args.district);
    filter_state.select_tambon(args.tambon);
    let selected = filter::apply(&records, &filter_state);

    let stats = species_stats(selected.iter().copied());
    let summary = summarize(selected.iter().copied());
    let slices = share_slices(&stats, args.limit);

    if args.json {
        let output = json!({
            "summary": summary,
            "species": stats,
            "shares": slices,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Records:         {}", summary.total_records);
    println!("Trees planted:   {}", summary.total_quantity);
    println!("Species:         {}", summary.unique_species);
    println!("Planters:        {}", summary.unique_planters);

    if stats.is_empty() {
        return Ok(());
    }

    println!();
    println!("{:<24} {:>8} {:>10}", "Species", "Records", "Quantity");
    for stat in &stats {
        println!("{:<24} {:>8} {:>10}", stat.name, stat.records, stat.quantity);
    }

    println!();
    println!("Share of top {}:", slices.len());
    for slice in &slices {
        println!("  {:<22} {:>5.1}%", slice.name, slice.fraction * 100.0);
    }
    Ok(())
}
