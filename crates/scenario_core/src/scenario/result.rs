use serde::{Deserialize, Serialize};

use crate::geometry::ZoneGeometry;
use crate::shares::ModeShares;

/// Which data path produced a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSource {
    /// Precomputed city dataset.
    Static,
    /// Zones from the geospatial model with synthetic shares.
    Model,
    /// Fixed single-zone dataset.
    Fallback,
}

/// Indicators of one transport zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub zone_id: String,
    pub local_admin_unit_id: String,
    pub geometry: ZoneGeometry,
    /// Minutes.
    pub average_travel_time: f64,
    pub total_distance_km: f64,
    pub total_time_min: f64,
    pub shares: ModeShares,
}

/// Origin-destination flow row. Scenarios currently ship an empty flow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub from: String,
    pub to: String,
    pub flow_volume: f64,
}

/// Id + geometry only, for consumers that do not need indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLookupEntry {
    pub zone_id: String,
    pub geometry: ZoneGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Normalized location code the scenario was computed for.
    pub location: String,
    pub source: ScenarioSource,
    pub zones: Vec<ZoneRecord>,
    pub flows: Vec<FlowRecord>,
    pub zone_lookup: Vec<ZoneLookupEntry>,
}

impl ScenarioResult {
    /// Build a result whose lookup mirrors `zones` and whose flow table is empty.
    pub fn from_zones(location: impl Into<String>, source: ScenarioSource, zones: Vec<ZoneRecord>) -> Self {
        let zone_lookup = zones
            .iter()
            .map(|zone| ZoneLookupEntry {
                zone_id: zone.zone_id.clone(),
                geometry: zone.geometry.clone(),
            })
            .collect();
        Self {
            location: location.into(),
            source,
            zones,
            flows: Vec::new(),
            zone_lookup,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ScenarioSource::Fallback
    }

    pub fn zone(&self, zone_id: &str) -> Option<&ZoneRecord> {
        self.zones.iter().find(|zone| zone.zone_id == zone_id)
    }
}
