//! Data model for planting records, administrative regions and view state.

mod filter_state;
mod record;
mod region;
mod visibility;

pub use filter_state::FilterState;
pub use record::{decode_records, PlantingRecord, RecordError};
pub use region::{AdministrativeRegion, GeoBounds, Geometry, LatLng, Tier};
pub use visibility::{BaseLayer, LayerToggle, VisibilityState};
