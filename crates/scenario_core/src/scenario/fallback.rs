use crate::geometry::ZoneGeometry;
use crate::metrics::total_time_minutes;
use crate::shares::ModeShares;

use super::result::{ScenarioResult, ScenarioSource, ZoneRecord};

/// Paris city centre `(lat, lng)`.
pub const FALLBACK_CENTER: (f64, f64) = (48.8566, 2.3522);
pub const FALLBACK_RADIUS_KM: f64 = 5.0;
pub const FALLBACK_ZONE_ID: &str = "paris";
pub const FALLBACK_ADMIN_UNIT: &str = "fr-75056";

const FALLBACK_AVERAGE_TRAVEL_TIME: f64 = 25.0;
const FALLBACK_TOTAL_DISTANCE_KM: f64 = 12.0;
const CIRCLE_VERTICES: usize = 64;

/// Fixed single-zone dataset returned whenever no better data can be produced.
pub fn fallback_scenario() -> ScenarioResult {
    let mut shares = ModeShares {
        car: 0.20,
        bicycle: 0.10,
        walk: 0.40,
        carpool: 0.05,
        pt_walk: 0.15,
        pt_car: 0.05,
        pt_bicycle: 0.05,
        public_transport: 0.0,
    };
    shares.refresh_public_transport();

    let zone = ZoneRecord {
        zone_id: FALLBACK_ZONE_ID.to_string(),
        local_admin_unit_id: FALLBACK_ADMIN_UNIT.to_string(),
        geometry: ZoneGeometry::circle(FALLBACK_CENTER, FALLBACK_RADIUS_KM, CIRCLE_VERTICES),
        average_travel_time: FALLBACK_AVERAGE_TRAVEL_TIME,
        total_distance_km: FALLBACK_TOTAL_DISTANCE_KM,
        total_time_min: total_time_minutes(FALLBACK_AVERAGE_TRAVEL_TIME),
        shares,
    };
    ScenarioResult::from_zones(FALLBACK_ADMIN_UNIT, ScenarioSource::Fallback, vec![zone])
}
