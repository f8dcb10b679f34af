//! Top-level orchestration of the map scene.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::context::MapContext;
use super::scene::{Marker, Scene, SceneLayer};
use super::style::LayerStyles;
use crate::boundary::{BoundaryCache, BoundarySource, LoadReport, TierState};
use crate::color::ColorAssigner;
use crate::density::{to_density_points, DensityOptions, DensitySurface};
use crate::filter;
use crate::interaction::{
    Dispatch, FeatureHit, GestureId, InteractionRouter, PointerEvent, SelectionEvent,
};
use crate::model::{FilterState, LatLng, LayerToggle, PlantingRecord, Tier, VisibilityState};
use crate::stats::{self, SpeciesStat, Summary};

/// Presentation settings for a composer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerOptions {
    pub colors: ColorAssigner,
    pub styles: LayerStyles,
    pub density: DensityOptions,
}

/// Owns view state and combines boundaries, records and interaction into a
/// [`Scene`].
///
/// The filtered record list and the density surface are re-derived
/// synchronously whenever the filter, the records, the heatmap flag or the
/// surface readiness change, so every scene reflects the latest filter.
/// Boundary loading is independent: [`LayerComposer::load_boundaries`] takes
/// `&self` and each tier appears in the scene as soon as it commits.
pub struct LayerComposer<S> {
    context: MapContext,
    boundaries: BoundaryCache<S>,
    visibility: VisibilityState,
    filter: FilterState,
    records: Option<Vec<PlantingRecord>>,
    /// Indices into `records` passing `filter`
    filtered: Vec<usize>,
    density: Option<DensitySurface>,
    router: InteractionRouter,
    options: ComposerOptions,
}

impl<S: BoundarySource> LayerComposer<S> {
    /// Create a composer over `source`. Returns the selection event stream.
    pub fn new(
        source: S,
        context: MapContext,
        options: ComposerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (router, events) = InteractionRouter::new();
        let composer = Self {
            context,
            boundaries: BoundaryCache::new(source),
            visibility: VisibilityState::default(),
            filter: FilterState::default(),
            records: None,
            filtered: Vec::new(),
            density: None,
            router,
            options,
        };
        (composer, events)
    }

    pub fn context(&self) -> &MapContext {
        &self.context
    }

    pub fn boundaries(&self) -> &BoundaryCache<S> {
        &self.boundaries
    }

    /// Fetch all boundary tiers concurrently.
    pub async fn load_boundaries(&self) -> LoadReport {
        info!(source = %self.boundaries.source().describe(), "Loading boundaries");
        self.boundaries.load_all().await
    }

    /// Availability of one tier.
    pub fn tier_state(&self, tier: Tier) -> TierState {
        self.boundaries.state(tier)
    }

    /// The map surface attached and can draw.
    pub fn attach(&mut self) {
        self.context.mark_ready();
        self.refresh_density();
    }

    /// The map surface went away without the view unmounting.
    pub fn detach(&mut self) {
        self.context.detach();
        self.refresh_density();
    }

    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.context.set_view(center, zoom);
    }

    /// Centre the view on the named region of `tier`.
    ///
    /// Returns false, leaving the view alone, when the tier is not loaded or
    /// has no region of that name.
    pub fn focus_region(&mut self, tier: Tier, name: &str) -> bool {
        let bounds = self.boundaries.get(tier).and_then(|collection| {
            collection
                .find(name)
                .and_then(|feature| feature.geometry.bounds())
        });
        match bounds {
            Some(bounds) => {
                self.context.focus(&bounds);
                debug!(
                    tier = %tier,
                    region = name,
                    center = %self.context.center(),
                    "View focused"
                );
                true
            }
            None => false,
        }
    }

    /// Replace the record list.
    pub fn set_records(&mut self, records: Vec<PlantingRecord>) {
        debug!(records = records.len(), "Records replaced");
        self.records = Some(records);
        self.recompute();
    }

    pub fn records(&self) -> Option<&[PlantingRecord]> {
        self.records.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Replace the filter.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.recompute();
    }

    /// Edit the filter in place.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut FilterState)) {
        edit(&mut self.filter);
        self.recompute();
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Flip a visibility flag, returning its new value.
    pub fn toggle(&mut self, layer: LayerToggle) -> bool {
        let visible = self.visibility.toggle(layer);
        if layer == LayerToggle::Heatmap {
            self.refresh_density();
        }
        visible
    }

    pub fn set_visible(&mut self, layer: LayerToggle, visible: bool) {
        self.visibility.set(layer, visible);
        if layer == LayerToggle::Heatmap {
            self.refresh_density();
        }
    }

    /// Records passing the current filter, in input order.
    pub fn filtered_records(&self) -> Vec<&PlantingRecord> {
        match &self.records {
            Some(records) => self.filtered.iter().filter_map(|&i| records.get(i)).collect(),
            None => Vec::new(),
        }
    }

    /// The live density surface, if any.
    pub fn density(&self) -> Option<&DensitySurface> {
        self.density.as_ref()
    }

    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InteractionRouter {
        &mut self.router
    }

    /// Route one pointer event through the router.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Dispatch {
        self.router.handle(&self.context, event)
    }

    /// Route a whole click with every feature under the pointer.
    pub fn handle_gesture(
        &mut self,
        gesture: GestureId,
        position: LatLng,
        hits: Vec<FeatureHit>,
    ) -> Dispatch {
        self.router
            .handle_gesture(&self.context, gesture, position, hits)
    }

    /// District choices for the location filter.
    pub fn district_options(&self) -> Vec<String> {
        self.boundaries.district_names()
    }

    /// Tambon choices under the currently selected district.
    pub fn tambon_options(&self) -> Vec<String> {
        self.boundaries
            .tambon_names(self.filter.selected_district.as_deref())
    }

    /// Species choices from every loaded record.
    pub fn species_options(&self) -> Vec<String> {
        stats::species_names(self.records.iter().flatten())
    }

    /// Per-species totals over the filtered records.
    pub fn species_stats(&self) -> Vec<SpeciesStat> {
        stats::species_stats(self.filtered_records())
    }

    /// Totals over the filtered records.
    pub fn summary(&self) -> Summary {
        stats::summarize(self.filtered_records())
    }

    /// Build the scene for the current state.
    pub fn scene(&self) -> Scene {
        let mut layers = Vec::with_capacity(6);

        let base = self.visibility.base_layer();
        layers.push(SceneLayer::Base {
            layer: base,
            url: self.context.tiles().url_for(base).to_string(),
        });

        for tier in Tier::ALL {
            if !self.visibility.is_visible(LayerToggle::Boundary(tier)) {
                continue;
            }
            if let Some(collection) = self.boundaries.get(tier) {
                layers.push(SceneLayer::Boundary {
                    tier,
                    collection,
                    style: self.options.styles.for_tier(tier).clone(),
                });
            }
        }

        if let Some(surface) = &self.density {
            layers.push(SceneLayer::Density(surface.clone()));
        }

        if self.records.is_some() {
            let markers = self
                .filtered_records()
                .into_iter()
                .map(|record| {
                    Marker::new(record, self.options.colors.color_for(&record.species_name))
                })
                .collect();
            layers.push(SceneLayer::Markers(markers));
        }

        Scene::new(layers)
    }

    /// Leave the view: revoke selection resources and drop the surface.
    pub fn unmount(&mut self) {
        self.router.unmount();
        self.context.detach();
        self.refresh_density();
        debug!("Composer unmounted");
    }

    fn recompute(&mut self) {
        self.filtered = match &self.records {
            Some(records) => filter::apply_indices(records, &self.filter),
            None => Vec::new(),
        };
        self.refresh_density();
    }

    /// Build the surface if the surface is ready, records are loaded and the
    /// heatmap is on; otherwise tear it down.
    fn refresh_density(&mut self) {
        let wanted =
            self.context.is_ready() && self.records.is_some() && self.visibility.heatmap;
        if !wanted {
            if self.density.take().is_some() {
                debug!("Density surface torn down");
            }
            return;
        }

        let points = to_density_points(self.filtered_records());
        self.density = DensitySurface::build(&self.context, points, self.options.density);
        if let Some(surface) = &self.density {
            debug!(
                points = surface.points().len(),
                total_weight = surface.total_weight(),
                "Density surface rebuilt"
            );
        }
    }
}
