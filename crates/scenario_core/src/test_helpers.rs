//! Test helpers for common test setup and utilities.
//!
//! Shared by the unit tests, the integration tests of this crate and the
//! session crate's tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::engine::{ScenarioEngine, ScenarioRequest};
use crate::error::{EngineResult, ScenarioError, ZoneProviderError};
use crate::geometry::ZoneGeometry;
use crate::modes::{ModeParams, ShareMode, TransportMode};
use crate::scenario::{fallback_scenario, ScenarioResult};
use crate::static_data::{ModeColumns, StaticCityDataset, StaticZoneRecord};
use crate::zone_provider::{ZoneFeature, ZoneProvider};

/// Paris city centre, used as the centre of sample zones.
pub const TEST_CENTER: (f64, f64) = (48.8566, 2.3522);

/// `count` small hexagon-like zones laid out east of [`TEST_CENTER`].
pub fn sample_zones(count: usize) -> Vec<ZoneFeature> {
    (0..count)
        .map(|i| ZoneFeature {
            zone_id: format!("zone-{i}"),
            local_admin_unit_id: "fr-75056".to_string(),
            geometry: ZoneGeometry::circle(
                (TEST_CENTER.0, TEST_CENTER.1 + 0.02 * i as f64),
                1.0,
                6,
            ),
        })
        .collect()
}

/// Zone provider returning the same zones for every request.
pub struct FixedZoneProvider {
    zones: Vec<ZoneFeature>,
}

impl FixedZoneProvider {
    pub fn new(zones: Vec<ZoneFeature>) -> Self {
        Self { zones }
    }
}

impl ZoneProvider for FixedZoneProvider {
    fn zones(&self, _location: &str, _radius_km: f64) -> Result<Vec<ZoneFeature>, ZoneProviderError> {
        Ok(self.zones.clone())
    }
}

/// Single-city dataset with deterministic raw columns.
pub fn sample_static_dataset(location: &str, zone_count: usize) -> StaticCityDataset {
    let zones = sample_zones(zone_count)
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            let mut modes = [ModeColumns::default(); 7];
            for mode in ShareMode::ALL {
                let k = (mode.index() + 1) as f64;
                modes[mode.index()] = ModeColumns {
                    time_min: 10.0 + k + i as f64,
                    dist_km: 0.5 * k,
                    share: 0.05 * k,
                };
            }
            StaticZoneRecord {
                zone_id: feature.zone_id,
                local_admin_unit_id: location.to_string(),
                geometry: feature.geometry,
                modes,
            }
        })
        .collect();
    StaticCityDataset {
        location: location.to_string(),
        zones,
    }
}

/// Write [`sample_static_dataset`] to `dir/file_name`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_sample_static_dataset(dir: &Path, file_name: &str, location: &str, zone_count: usize) {
    sample_static_dataset(location, zone_count)
        .save_to_file(&dir.join(file_name))
        .expect("sample dataset should be writable");
}

/// Request with only the car active.
pub fn car_only_request(location: &str, radius_km: f64) -> ScenarioRequest {
    ScenarioRequest::new(location, radius_km)
        .with_mode_params(ModeParams::only(&[TransportMode::Car]))
}

/// Active-share sum of every zone, for asserting normalization.
pub fn active_share_sums(result: &ScenarioResult, params: &ModeParams) -> Vec<f64> {
    let active = params.active_share_modes();
    result
        .zones
        .iter()
        .map(|zone| zone.shares.sum_over(&active))
        .collect()
}

/// What a [`ScriptedEngine`] does on each call.
#[derive(Debug, Clone)]
pub enum EngineBehavior {
    /// Return the fallback dataset.
    Succeed,
    /// Return a computation error with this message.
    Fail(String),
    /// Panic with this message.
    Panic(String),
}

/// Engine that counts calls and tracks peak concurrency, sleeping `delay`
/// inside each call.
pub struct ScriptedEngine {
    behavior: EngineBehavior,
    delay: Duration,
    calls: AtomicUsize,
    running: AtomicUsize,
    max_running: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(behavior: EngineBehavior, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            delay,
            calls: AtomicUsize::new(0),
            running: AtomicUsize::new(0),
            max_running: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_running(&self) -> usize {
        self.max_running.load(Ordering::SeqCst)
    }
}

impl ScenarioEngine for ScriptedEngine {
    fn compute(&self, _request: &ScenarioRequest) -> EngineResult<Arc<ScenarioResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.running.fetch_sub(1, Ordering::SeqCst);

        match &self.behavior {
            EngineBehavior::Succeed => Ok(Arc::new(fallback_scenario())),
            EngineBehavior::Fail(message) => Err(ScenarioError::Computation(message.clone())),
            EngineBehavior::Panic(message) => panic!("{message}"),
        }
    }
}
