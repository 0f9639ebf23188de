//! Zone geometry: WGS84 polygons, great-circle distances and geodesic areas.
//!
//! Polygons are `geo` polygons with `x = lng`, `y = lat` in degrees. Helper
//! functions that take or return single points keep the crate's `(lat, lng)`
//! tuple order.

use geo::{Centroid, Destination, GeodesicArea, Haversine};
use geo_types::{Coord, LineString, Point, Polygon};
use h3o::{CellIndex, LatLng};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `(lat, lng)` points in kilometres.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Outline of one transport zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    pub polygon: Polygon<f64>,
}

impl Default for ZoneGeometry {
    fn default() -> Self {
        Self::new(Polygon::new(LineString::new(Vec::new()), Vec::new()))
    }
}

impl ZoneGeometry {
    pub fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }

    /// Regular polygon approximating a circle of `radius_km` around the
    /// `(lat, lng)` `center`.
    pub fn circle(center: (f64, f64), radius_km: f64, vertices: usize) -> Self {
        let vertices = vertices.max(3);
        let origin = Point::new(center.1, center.0);
        let ring: Vec<Coord<f64>> = (0..vertices)
            .map(|i| {
                let bearing = 360.0 * i as f64 / vertices as f64;
                Haversine.destination(origin, bearing, radius_km * 1000.0).into()
            })
            .collect();
        Self::new(Polygon::new(LineString::from(ring), Vec::new()))
    }

    /// Hexagonal (or pentagonal) boundary of an H3 cell.
    pub fn from_cell(cell: CellIndex) -> Self {
        let ring: Vec<Coord<f64>> = cell
            .boundary()
            .iter()
            .map(|vertex| Coord {
                x: vertex.lng(),
                y: vertex.lat(),
            })
            .collect();
        Self::new(Polygon::new(LineString::from(ring), Vec::new()))
    }

    /// Number of distinct vertices of the outer ring.
    pub fn vertex_count(&self) -> usize {
        let coords = self.polygon.exterior().0.len();
        if self.polygon.exterior().is_closed() {
            coords.saturating_sub(1)
        } else {
            coords
        }
    }

    /// Fewer than three distinct vertices: no area.
    pub fn is_empty(&self) -> bool {
        self.vertex_count() < 3
    }

    /// Centroid as `(lat, lng)`.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        self.polygon.centroid().map(|point| (point.y(), point.x()))
    }

    /// Geodesic area on the WGS84 ellipsoid, in square metres.
    pub fn area_m2(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.polygon.geodesic_area_unsigned()
    }
}

/// Centre point of an H3 cell as `(lat, lng)`.
pub fn cell_center(cell: CellIndex) -> (f64, f64) {
    let center: LatLng = cell.into();
    (center.lat(), center.lng())
}
