//! Record filtering.
//!
//! The predicate is a conjunction of three independent constraints:
//!
//! ```text
//! (species set empty    OR species ∈ set)
//! AND (no district      OR record.district == district)
//! AND (no tambon        OR record.tambon == tambon)
//! ```
//!
//! The tambon constraint only applies under a selected district. A record
//! with a missing administrative name never satisfies an active constraint
//! on that name.

use crate::model::{FilterState, PlantingRecord};

/// True if `record` passes every active constraint in `filter`.
pub fn matches(record: &PlantingRecord, filter: &FilterState) -> bool {
    let species_ok = filter.selected_species.is_empty()
        || filter.selected_species.contains(&record.species_name);

    let district_ok = match filter.selected_district.as_deref() {
        Some(district) => record.district_name.as_deref() == Some(district),
        None => true,
    };

    let tambon_ok = match filter.effective_tambon() {
        Some(tambon) => record.tambon_name.as_deref() == Some(tambon),
        None => true,
    };

    species_ok && district_ok && tambon_ok
}

/// Records passing `filter`, in input order.
pub fn apply<'a>(records: &'a [PlantingRecord], filter: &FilterState) -> Vec<&'a PlantingRecord> {
    records.iter().filter(|r| matches(r, filter)).collect()
}

/// Indices of records passing `filter`, ascending.
pub fn apply_indices(records: &[PlantingRecord], filter: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, filter))
        .map(|(i, _)| i)
        .collect()
}
