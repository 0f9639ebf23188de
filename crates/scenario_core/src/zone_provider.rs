//! Pluggable zone providers: the external geospatial model behind a trait.
//!
//! Two implementations, selectable via [`ZoneProviderKind`]:
//!
//! - **`H3ZoneProvider`**: tiles an H3 hexagon grid around the known centre of
//!   the requested city and keeps the cells inside the study radius.
//! - **`UnavailableZoneProvider`**: stands in for a deployment without a zone
//!   model; every call reports the model as unavailable.
//!
//! Provider failures never reach the caller: the scenario computer catches them
//! once and substitutes the fallback dataset.

use std::collections::HashMap;

use h3o::{LatLng, Resolution};
use serde::{Deserialize, Serialize};

use crate::error::ZoneProviderError;
use crate::geometry::{cell_center, haversine_km, ZoneGeometry};

/// Upper bound on grid rings so an absurd radius cannot explode the zone count.
const MAX_GRID_RINGS: u32 = 30;

/// Known city centres `(lat, lng)` keyed by normalized location code.
const CITY_CENTERS: [(&str, (f64, f64)); 11] = [
    ("fr-75056", (48.8566, 2.3522)),
    ("fr-75101", (48.8625, 2.3364)),
    ("fr-13055", (43.2965, 5.3698)),
    ("fr-69123", (45.7640, 4.8357)),
    ("fr-31555", (43.6047, 1.4442)),
    ("fr-06088", (43.7102, 7.2620)),
    ("fr-44109", (47.2184, -1.5536)),
    ("fr-34172", (43.6108, 3.8767)),
    ("fr-67482", (48.5734, 7.7521)),
    ("fr-33063", (44.8378, -0.5792)),
    ("fr-59350", (50.6292, 3.0573)),
];

/// A transport zone as delivered by the zone model, before any indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFeature {
    pub zone_id: String,
    pub local_admin_unit_id: String,
    pub geometry: ZoneGeometry,
}

/// Which zone model to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum ZoneProviderKind {
    /// H3 hexagon tiling around known city centres.
    #[default]
    H3Grid,
    /// No zone model; every request takes the fallback path.
    Unavailable,
}

/// Trait for zone models. Implementations must be `Send + Sync` so one provider
/// can serve computations running on any worker thread.
pub trait ZoneProvider: Send + Sync {
    /// Zones covering `radius_km` around `location` (a normalized code).
    fn zones(&self, location: &str, radius_km: f64) -> Result<Vec<ZoneFeature>, ZoneProviderError>;
}

pub struct H3ZoneProvider {
    resolution: Resolution,
    centers: HashMap<String, (f64, f64)>,
}

impl Default for H3ZoneProvider {
    fn default() -> Self {
        Self::new(Resolution::Six)
    }
}

impl H3ZoneProvider {
    pub fn new(resolution: Resolution) -> Self {
        let centers = CITY_CENTERS
            .iter()
            .map(|(code, center)| (code.to_string(), *center))
            .collect();
        Self {
            resolution,
            centers,
        }
    }

    /// Register or replace the centre of a location.
    pub fn with_center(mut self, location: &str, center: (f64, f64)) -> Self {
        self.centers.insert(location.to_string(), center);
        self
    }

    fn rings_for_radius(&self, radius_km: f64) -> u32 {
        // Centre-to-centre spacing of neighbouring hexagons.
        let spacing_km = self.resolution.edge_length_km() * 3f64.sqrt();
        let rings = (radius_km / spacing_km).ceil();
        (rings as u32).min(MAX_GRID_RINGS)
    }
}

impl ZoneProvider for H3ZoneProvider {
    fn zones(&self, location: &str, radius_km: f64) -> Result<Vec<ZoneFeature>, ZoneProviderError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ZoneProviderError::InvalidRadius(radius_km));
        }
        let center = *self
            .centers
            .get(location)
            .ok_or_else(|| ZoneProviderError::UnknownLocation(location.to_string()))?;
        let origin = LatLng::new(center.0, center.1)
            .map_err(|error| ZoneProviderError::Unavailable(error.to_string()))?
            .to_cell(self.resolution);

        let rings = self.rings_for_radius(radius_km);
        let zones = origin
            .grid_disk::<Vec<_>>(rings)
            .into_iter()
            .filter(|cell| *cell == origin || haversine_km(center, cell_center(*cell)) <= radius_km)
            .map(|cell| ZoneFeature {
                zone_id: cell.to_string(),
                local_admin_unit_id: location.to_string(),
                geometry: ZoneGeometry::from_cell(cell),
            })
            .collect();
        Ok(zones)
    }
}

pub struct UnavailableZoneProvider;

impl ZoneProvider for UnavailableZoneProvider {
    fn zones(&self, _location: &str, _radius_km: f64) -> Result<Vec<ZoneFeature>, ZoneProviderError> {
        Err(ZoneProviderError::Unavailable(
            "no zone model configured".to_string(),
        ))
    }
}

/// Construct a boxed [`ZoneProvider`] from a [`ZoneProviderKind`] descriptor.
pub fn build_zone_provider(kind: &ZoneProviderKind) -> Box<dyn ZoneProvider> {
    match kind {
        ZoneProviderKind::H3Grid => Box::new(H3ZoneProvider::default()),
        ZoneProviderKind::Unavailable => Box::new(UnavailableZoneProvider),
    }
}
