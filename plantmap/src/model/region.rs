//! Administrative tiers, coordinates and boundary geometry.

use std::fmt;
use std::str::FromStr;

use geo::{BoundingRect, Coord, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
///
/// Coordinates are treated as planar; no geodesic math is performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Create a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// One of the three nested administrative levels.
///
/// Ordered outermost first: district > tambon > village.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Amphoe (district), the outermost tier
    District,
    /// Tambon (sub-district)
    Tambon,
    /// Muban (village), the innermost tier
    Village,
}

impl Tier {
    /// All tiers, outermost first. This is also the boundary rendering order.
    pub const ALL: [Tier; 3] = [Tier::District, Tier::Tambon, Tier::Village];

    /// Plural name used for endpoints, file names and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::District => "districts",
            Tier::Tambon => "tambons",
            Tier::Village => "villages",
        }
    }

    /// Property keys every feature of this tier must carry.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Tier::District => &["name"],
            Tier::Tambon => &["name", "districtName"],
            Tier::Village => &["name", "tambonName", "districtName"],
        }
    }

    /// Property key naming the enclosing region, if the tier has one.
    pub fn parent_key(&self) -> Option<&'static str> {
        match self {
            Tier::District => None,
            Tier::Tambon => Some("districtName"),
            Tier::Village => Some("tambonName"),
        }
    }

    /// Stable slot index (0 = district).
    pub(crate) fn index(&self) -> usize {
        match self {
            Tier::District => 0,
            Tier::Tambon => 1,
            Tier::Village => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "district" | "districts" => Ok(Tier::District),
            "tambon" | "tambons" => Ok(Tier::Tambon),
            "village" | "villages" => Ok(Tier::Village),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Boundary geometry. Coordinates are `x = lng`, `y = lat` as in GeoJSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    /// GeoJSON discriminator for this geometry.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Polygons making up this geometry.
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon),
            Geometry::MultiPolygon(parts) => &parts.0,
        }
    }

    /// Planar bounding box, or `None` for an empty geometry.
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            Geometry::Polygon(polygon) => polygon.bounding_rect(),
            Geometry::MultiPolygon(parts) => parts.bounding_rect(),
        }
    }
}

/// Planar bounding box in degrees (`x = lng`, `y = lat`).
pub type GeoBounds = Rect<f64>;

impl From<Coord<f64>> for LatLng {
    fn from(coord: Coord<f64>) -> Self {
        LatLng::new(coord.y, coord.x)
    }
}

/// A named administrative region as held by the boundary cache.
///
/// `parent_name` is a weak reference by name to the enclosing region.
#[derive(Debug, Clone, PartialEq)]
pub struct AdministrativeRegion {
    pub name: String,
    pub tier: Tier,
    pub parent_name: Option<String>,
    pub boundary: Geometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    use geo::LineString;

    fn square(lng: f64, lat: f64, size: f64) -> Polygon<f64> {
        let exterior = LineString::from(vec![
            [lng, lat],
            [lng + size, lat],
            [lng + size, lat + size],
            [lng, lat + size],
            [lng, lat],
        ]);
        Polygon::new(exterior, vec![])
    }

    #[test]
    fn test_tier_order_is_outermost_first() {
        assert_eq!(Tier::ALL, [Tier::District, Tier::Tambon, Tier::Village]);
        assert!(Tier::District < Tier::Village);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("villages".parse::<Tier>(), Ok(Tier::Village));
        assert_eq!("District".parse::<Tier>(), Ok(Tier::District));
        assert!("province".parse::<Tier>().is_err());
    }

    #[test]
    fn test_required_keys_cascade() {
        assert_eq!(Tier::District.required_keys(), &["name"]);
        assert_eq!(
            Tier::Village.required_keys(),
            &["name", "tambonName", "districtName"]
        );
        assert_eq!(Tier::Tambon.parent_key(), Some("districtName"));
        assert_eq!(Tier::District.parent_key(), None);
    }

    #[test]
    fn test_polygon_bounds() {
        let geometry = Geometry::Polygon(square(99.9, 6.6, 0.1));
        let bounds = geometry.bounds().unwrap();
        assert!((bounds.min().x - 99.9).abs() < 1e-9);
        assert!((bounds.max().y - 6.7).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_bounds_cover_all_parts() {
        let geometry = Geometry::MultiPolygon(MultiPolygon::new(vec![
            square(99.0, 6.0, 1.0),
            square(101.0, 8.0, 1.0),
        ]));
        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.min().x, 99.0);
        assert_eq!(bounds.max().x, 102.0);
        assert_eq!(LatLng::from(bounds.center()), LatLng::new(7.5, 100.5));
        assert_eq!(geometry.polygons().len(), 2);
    }

    #[test]
    fn test_empty_geometry_has_no_bounds() {
        let empty = Geometry::MultiPolygon(MultiPolygon::new(vec![]));
        assert!(empty.bounds().is_none());
        assert!(empty.polygons().is_empty());
    }
}
