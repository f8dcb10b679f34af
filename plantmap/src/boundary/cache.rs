//! Generation-tagged boundary cache.
//!
//! Each tier has one slot holding the latest collection and the generation
//! of the fetch that produced it. Every fetch takes a [`FetchTicket`] carrying
//! a fresh generation before it suspends; when it resolves, the result is
//! committed only if its generation is not older than the slot's. A fetch
//! that started earlier but resolved later can therefore never overwrite
//! fresher data.
//!
//! # Lifecycle
//!
//! ```text
//! Pending --[commit Ok]--> Ready
//! Pending --[commit Err]--> Absent
//! Ready/Absent --[newer commit]--> Ready/Absent (replaced wholesale)
//! any --[older commit]--> unchanged (StaleGenerationDiscarded)
//! ```
//!
//! There is no TTL and no automatic retry; callers refresh by calling
//! [`BoundaryCache::load`] again.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::FetchError;
use super::geojson::{parse_feature_collection, FeatureCollection};
use super::source::BoundarySource;
use crate::model::Tier;

/// Availability of one tier.
#[derive(Debug, Clone, PartialEq)]
pub enum TierState {
    /// No fetch has resolved yet
    Pending,
    /// Latest committed fetch produced a collection
    Ready(Arc<FeatureCollection>),
    /// Latest committed fetch failed; the layer is omitted
    Absent,
}

impl TierState {
    /// Collection, if ready.
    pub fn collection(&self) -> Option<&Arc<FeatureCollection>> {
        match self {
            TierState::Ready(collection) => Some(collection),
            _ => None,
        }
    }
}

/// Proof that a fetch for `tier` was started with `generation`.
///
/// Consumed by [`BoundaryCache::commit`], so a fetch can commit at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    tier: Tier,
    generation: u64,
}

impl FetchTicket {
    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of committing a fetch result to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Collection stored
    Applied,
    /// Failure recorded; tier is now absent
    Absent,
    /// A newer fetch already committed; result dropped
    StaleGenerationDiscarded,
}

#[derive(Debug)]
struct Slot {
    state: TierState,
    /// Generation of the last committed fetch (0 = none)
    generation: u64,
}

#[derive(Debug)]
struct Inner {
    slots: [Slot; 3],
    next_generation: u64,
}

/// Per-tier outcome of [`BoundaryCache::load_all`].
#[derive(Debug)]
pub struct LoadReport {
    pub outcomes: Vec<(Tier, Result<Arc<FeatureCollection>, FetchError>)>,
}

impl LoadReport {
    /// Tiers that loaded successfully.
    pub fn loaded(&self) -> Vec<Tier> {
        self.outcomes
            .iter()
            .filter(|(_, result)| result.is_ok())
            .map(|(tier, _)| *tier)
            .collect()
    }

    /// Tiers that failed, with their errors.
    pub fn failed(&self) -> Vec<(Tier, &FetchError)> {
        self.outcomes
            .iter()
            .filter_map(|(tier, result)| result.as_ref().err().map(|e| (*tier, e)))
            .collect()
    }
}

/// Holds the three boundary tiers for the lifetime of a composer.
pub struct BoundaryCache<S> {
    source: S,
    inner: Mutex<Inner>,
    revision: watch::Sender<u64>,
}

impl<S: BoundarySource> BoundaryCache<S> {
    /// Create an empty cache over `source`. All tiers start `Pending`.
    pub fn new(source: S) -> Self {
        let slot = || Slot {
            state: TierState::Pending,
            generation: 0,
        };
        let (revision, _) = watch::channel(0);
        Self {
            source,
            inner: Mutex::new(Inner {
                slots: [slot(), slot(), slot()],
                next_generation: 1,
            }),
            revision,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start a fetch for `tier`, allocating a fresh generation.
    pub fn begin(&self, tier: Tier) -> FetchTicket {
        let mut inner = self.inner.lock();
        let generation = inner.next_generation;
        inner.next_generation += 1;
        FetchTicket { tier, generation }
    }

    /// Commit a resolved fetch. `None` records a failure.
    ///
    /// Rejected when the slot already holds a newer generation.
    pub fn commit(
        &self,
        ticket: FetchTicket,
        collection: Option<Arc<FeatureCollection>>,
    ) -> CommitOutcome {
        let outcome = {
            let mut inner = self.inner.lock();
            let slot = &mut inner.slots[ticket.tier.index()];
            if ticket.generation < slot.generation {
                debug!(
                    tier = %ticket.tier,
                    generation = ticket.generation,
                    stored = slot.generation,
                    "Discarding stale boundary fetch"
                );
                return CommitOutcome::StaleGenerationDiscarded;
            }
            slot.generation = ticket.generation;
            match collection {
                Some(collection) => {
                    slot.state = TierState::Ready(collection);
                    CommitOutcome::Applied
                }
                None => {
                    slot.state = TierState::Absent;
                    CommitOutcome::Absent
                }
            }
        };
        self.revision.send_modify(|rev| *rev += 1);
        outcome
    }

    /// Fetch, validate and commit one tier.
    ///
    /// Returns what this fetch produced. If a newer fetch committed first the
    /// result is still returned but the cache keeps the newer value.
    pub async fn load(&self, tier: Tier) -> Result<Arc<FeatureCollection>, FetchError> {
        let ticket = self.begin(tier);
        debug!(tier = %tier, generation = ticket.generation, "Fetching boundaries");

        let result = match self.source.fetch(tier).await {
            Ok(bytes) => parse_feature_collection(tier, &bytes),
            Err(e) => Err(e),
        };

        match result {
            Ok(validated) => {
                for defect in &validated.defects {
                    warn!(
                        tier = %tier,
                        feature = defect.index(),
                        reason = %defect,
                        "Dropping boundary feature"
                    );
                }
                let collection = Arc::new(validated.collection);
                if self.commit(ticket, Some(Arc::clone(&collection))) == CommitOutcome::Applied {
                    info!(
                        tier = %tier,
                        features = collection.len(),
                        dropped = validated.defects.len(),
                        "Boundary tier loaded"
                    );
                }
                Ok(collection)
            }
            Err(e) => {
                warn!(tier = %tier, error = %e, "Boundary tier unavailable, layer omitted");
                self.commit(ticket, None);
                Err(e)
            }
        }
    }

    /// Load all tiers concurrently on the current task.
    ///
    /// Tiers resolve and commit independently; one slow or failing tier does
    /// not hold back the others.
    pub async fn load_all(&self) -> LoadReport {
        let (districts, tambons, villages) = tokio::join!(
            self.load(Tier::District),
            self.load(Tier::Tambon),
            self.load(Tier::Village)
        );
        LoadReport {
            outcomes: vec![
                (Tier::District, districts),
                (Tier::Tambon, tambons),
                (Tier::Village, villages),
            ],
        }
    }

    /// Current state of a tier.
    pub fn state(&self, tier: Tier) -> TierState {
        self.inner.lock().slots[tier.index()].state.clone()
    }

    /// Collection for a tier, if ready.
    pub fn get(&self, tier: Tier) -> Option<Arc<FeatureCollection>> {
        self.state(tier).collection().cloned()
    }

    /// Generation of the last committed fetch for a tier (0 = none).
    pub fn generation(&self, tier: Tier) -> u64 {
        self.inner.lock().slots[tier.index()].generation
    }

    /// Receiver notified after every committed write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Sorted, de-duplicated district names from the district tier.
    pub fn district_names(&self) -> Vec<String> {
        self.names(Tier::District, |_| true)
    }

    /// Sorted, de-duplicated tambon names, optionally within one district.
    pub fn tambon_names(&self, district: Option<&str>) -> Vec<String> {
        self.names(Tier::Tambon, |feature| match district {
            Some(district) => feature.property("districtName") == Some(district),
            None => true,
        })
    }

    fn names(
        &self,
        tier: Tier,
        keep: impl Fn(&super::geojson::BoundaryFeature) -> bool,
    ) -> Vec<String> {
        let Some(collection) = self.get(tier) else {
            return Vec::new();
        };
        collection
            .features()
            .iter()
            .filter(|f| keep(f))
            .map(|f| f.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
