//! Density surface input.
//!
//! Records become weighted points for the heatmap layer. Weights never drop
//! below one, so a record with a bad quantity still shows up.

use serde::Serialize;

use crate::composer::MapContext;
use crate::model::PlantingRecord;

/// Default kernel radius in pixels.
pub const DEFAULT_RADIUS: u32 = 25;

/// Default blur in pixels.
pub const DEFAULT_BLUR: u32 = 15;

/// Zoom at which points reach full intensity.
pub const DEFAULT_MAX_ZOOM: u8 = 17;

/// A weighted point fed to the density surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: u32,
}

impl From<&PlantingRecord> for DensityPoint {
    fn from(record: &PlantingRecord) -> Self {
        Self {
            lat: record.position.lat,
            lng: record.position.lng,
            weight: record.effective_quantity(),
        }
    }
}

/// Weighted points for `records`, in input order.
pub fn to_density_points<'a, I>(records: I) -> Vec<DensityPoint>
where
    I: IntoIterator<Item = &'a PlantingRecord>,
{
    records.into_iter().map(DensityPoint::from).collect()
}

/// Rendering parameters for the density layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityOptions {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            blur: DEFAULT_BLUR,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Aggregation state retained by a live heatmap layer.
///
/// Owned by the composer; dropping it is the teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySurface {
    points: Vec<DensityPoint>,
    options: DensityOptions,
    total_weight: u64,
    max_weight: u32,
}

impl DensitySurface {
    /// Build a surface for `points` on `context`.
    ///
    /// Returns `None` when the context is not ready or there is nothing to
    /// draw.
    pub fn build(
        context: &MapContext,
        points: Vec<DensityPoint>,
        options: DensityOptions,
    ) -> Option<Self> {
        if !context.is_ready() || points.is_empty() {
            return None;
        }
        let total_weight = points.iter().map(|p| p.weight as u64).sum();
        let max_weight = points.iter().map(|p| p.weight).max().unwrap_or(1);
        Some(Self {
            points,
            options,
            total_weight,
            max_weight,
        })
    }

    pub fn points(&self) -> &[DensityPoint] {
        &self.points
    }

    pub fn options(&self) -> DensityOptions {
        self.options
    }

    /// Sum of all point weights.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Largest single weight, used to normalise intensity.
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Intensity of a point in `0.0..=1.0`.
    pub fn intensity(&self, point: &DensityPoint) -> f64 {
        point.weight as f64 / self.max_weight.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LatLng;
    use proptest::prelude::*;

    fn ready_context() -> MapContext {
        let mut context = MapContext::default();
        context.mark_ready();
        context
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(to_density_points(&Vec::<PlantingRecord>::new()).is_empty());
    }

    #[test]
    fn test_weight_is_at_least_one() {
        let records = vec![
            PlantingRecord::new("a", "Pradu", 0, LatLng::new(6.6, 100.0)),
            PlantingRecord::new("b", "Pradu", -4, LatLng::new(6.7, 100.0)),
            PlantingRecord::new("c", "Pradu", 12, LatLng::new(6.8, 100.0)),
        ];
        let weights: Vec<u32> = to_density_points(&records).iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![1, 1, 12]);
    }

    #[test]
    fn test_points_preserve_order_and_position() {
        let records = vec![
            PlantingRecord::new("a", "Yang", 2, LatLng::new(6.61, 99.95)),
            PlantingRecord::new("b", "Yang", 3, LatLng::new(6.62, 99.96)),
        ];
        let points = to_density_points(&records);
        assert_eq!(
            points[0],
            DensityPoint {
                lat: 6.61,
                lng: 99.95,
                weight: 2
            }
        );
        assert_eq!(points[1].lat, 6.62);
    }

    #[test]
    fn test_surface_requires_ready_context() {
        let points = vec![DensityPoint {
            lat: 6.6,
            lng: 100.0,
            weight: 1,
        }];
        let options = DensityOptions::default();
        let context = MapContext::default();
        assert!(DensitySurface::build(&context, points.clone(), options).is_none());
        assert!(DensitySurface::build(&ready_context(), points, options).is_some());
    }

    #[test]
    fn test_surface_not_built_for_no_points() {
        let options = DensityOptions::default();
        let surface = DensitySurface::build(&ready_context(), Vec::new(), options);
        assert!(surface.is_none());
    }

    #[test]
    fn test_surface_weights() {
        let points = vec![
            DensityPoint {
                lat: 6.6,
                lng: 100.0,
                weight: 2,
            },
            DensityPoint {
                lat: 6.7,
                lng: 100.0,
                weight: 8,
            },
        ];
        let surface =
            DensitySurface::build(&ready_context(), points, DensityOptions::default()).unwrap();
        assert_eq!(surface.total_weight(), 10);
        assert_eq!(surface.max_weight(), 8);
        assert_eq!(surface.intensity(&surface.points()[0]), 0.25);
    }

    proptest! {
        /// Every record yields exactly one point, weighted at least one.
        #[test]
        fn prop_weight_is_at_least_one(
            quantities in prop::collection::vec(any::<i64>(), 0..32),
        ) {
            let records: Vec<PlantingRecord> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    PlantingRecord::new(i.to_string(), "Pradu", *q, LatLng::new(6.6, 100.0))
                })
                .collect();

            let points = to_density_points(&records);

            prop_assert_eq!(points.len(), records.len());
            for (point, quantity) in points.iter().zip(&quantities) {
                prop_assert!(point.weight >= 1);
                if (1..=u32::MAX as i64).contains(quantity) {
                    prop_assert_eq!(point.weight as i64, *quantity);
                }
            }
        }
    }
}
