//! Filter selections driving the record pipeline.

use std::collections::BTreeSet;

/// Current species and location filter.
///
/// An empty species set means "all species". The tambon selection is only
/// meaningful under a selected district: [`FilterState::select_district`]
/// always clears it, and [`FilterState::effective_tambon`] ignores it while
/// no district is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_species: BTreeSet<String>,
    pub selected_district: Option<String>,
    pub selected_tambon: Option<String>,
}

impl FilterState {
    /// Unfiltered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to a district.
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.select_district(Some(district.into()));
        self
    }

    /// Builder: restrict to a tambon (only effective with a district).
    pub fn with_tambon(mut self, tambon: impl Into<String>) -> Self {
        self.select_tambon(Some(tambon.into()));
        self
    }

    /// Builder: add a species to the selection.
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.selected_species.insert(species.into());
        self
    }

    /// Toggle a species in or out of the selection.
    pub fn toggle_species(&mut self, species: &str) {
        if !self.selected_species.remove(species) {
            self.selected_species.insert(species.to_string());
        }
    }

    /// Add every name to the selection. Repeated names are kept once.
    pub fn select_species<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_species
            .extend(names.into_iter().map(Into::into).filter(|s: &String| !s.is_empty()));
    }

    /// Back to "all species".
    pub fn clear_species(&mut self) {
        self.selected_species.clear();
    }

    /// Select a district. Any tambon selection is reset.
    pub fn select_district(&mut self, district: Option<String>) {
        self.selected_district = district.filter(|d| !d.is_empty());
        self.selected_tambon = None;
    }

    /// Select a tambon within the current district.
    pub fn select_tambon(&mut self, tambon: Option<String>) {
        self.selected_tambon = tambon.filter(|t| !t.is_empty());
    }

    /// The tambon constraint actually in force.
    pub fn effective_tambon(&self) -> Option<&str> {
        match self.selected_district {
            Some(_) => self.selected_tambon.as_deref(),
            None => None,
        }
    }

    /// True when no constraint is active.
    pub fn is_unfiltered(&self) -> bool {
        self.selected_species.is_empty() && self.selected_district.is_none()
    }
}
