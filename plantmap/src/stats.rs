//! Species statistics for the sidebar.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::PlantingRecord;

/// Label for records without a species name.
pub const UNSPECIFIED_SPECIES: &str = "Unspecified";

/// Number of slices in the species share chart.
pub const DEFAULT_SLICE_LIMIT: usize = 8;

/// Per-species totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesStat {
    pub name: String,
    /// Number of records
    pub records: usize,
    /// Trees planted, each record counting at least one
    pub quantity: u64,
}

/// Totals over a record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_quantity: u64,
    pub total_records: usize,
    /// Distinct named planters
    pub unique_planters: usize,
    pub unique_species: usize,
}

/// One slice of the species share chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareSlice {
    pub name: String,
    pub quantity: u64,
    /// Share of the charted total, `0.0..=1.0`
    pub fraction: f64,
}

fn species_label(record: &PlantingRecord) -> &str {
    let name = record.species_name.trim();
    if name.is_empty() {
        UNSPECIFIED_SPECIES
    } else {
        name
    }
}

/// Per-species totals, largest quantity first, ties by name.
pub fn species_stats<'a, I>(records: I) -> Vec<SpeciesStat>
where
    I: IntoIterator<Item = &'a PlantingRecord>,
{
    let mut by_name: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_name.entry(species_label(record)).or_default();
        entry.0 += 1;
        entry.1 += record.effective_quantity() as u64;
    }

    let mut stats: Vec<SpeciesStat> = by_name
        .into_iter()
        .map(|(name, (records, quantity))| SpeciesStat {
            name: name.to_string(),
            records,
            quantity,
        })
        .collect();
    // BTreeMap order makes the stable sort break ties by name
    stats.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    stats
}

/// Totals over `records`.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a PlantingRecord>,
{
    let mut summary = Summary::default();
    let mut planters = BTreeSet::new();
    let mut species = BTreeSet::new();
    for record in records {
        summary.total_records += 1;
        summary.total_quantity += record.effective_quantity() as u64;
        if let Some(planter) = record.planter_name.as_deref() {
            planters.insert(planter);
        }
        species.insert(species_label(record));
    }
    summary.unique_planters = planters.len();
    summary.unique_species = species.len();
    summary
}

/// The first `limit` species as chart slices.
///
/// Fractions are relative to the charted slices, so they sum to one.
pub fn share_slices(stats: &[SpeciesStat], limit: usize) -> Vec<ShareSlice> {
    let shown = &stats[..stats.len().min(limit)];
    let total: u64 = shown.iter().map(|s| s.quantity).sum();
    shown
        .iter()
        .map(|s| ShareSlice {
            name: s.name.clone(),
            quantity: s.quantity,
            fraction: if total == 0 {
                0.0
            } else {
                s.quantity as f64 / total as f64
            },
        })
        .collect()
}

/// Distinct species names, sorted. Unnamed records are skipped.
pub fn species_names<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PlantingRecord>,
{
    records
        .into_iter()
        .map(|r| r.species_name.trim())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
