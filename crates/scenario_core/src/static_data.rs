//! Precomputed per-city datasets loaded from disk.
//!
//! A dataset stores, per zone and per share column, a raw travel time, a raw
//! distance and a raw share. Files are bincode-encoded [`StaticCityDataset`]s.
//! The loader keeps one decoded copy per file resident and re-derives the
//! mode-filtered indicators on every request; the derivation is cheap, so only
//! the raw records are cached.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StaticDataError;
use crate::geometry::ZoneGeometry;
use crate::metrics::total_time_minutes;
use crate::modes::{ModeParams, ShareMode};
use crate::scenario::{ScenarioResult, ScenarioSource, ZoneRecord};
use crate::shares::{renormalize, ModeShares};

/// Default directory holding precomputed datasets, relative to the working directory.
pub const DEFAULT_STATIC_DATA_DIR: &str = "data/precompiled";

/// Normalized location → dataset file name.
const DEFAULT_CATALOG: [(&str, &str); 10] = [
    ("fr-75056", "paris_75056_static.bin"),
    ("fr-13055", "marseille_13055_static.bin"),
    ("fr-69123", "lyon_69123_static.bin"),
    ("fr-31555", "toulouse_31555_static.bin"),
    ("fr-06088", "nice_06088_static.bin"),
    ("fr-44109", "nantes_44109_static.bin"),
    ("fr-34172", "montpellier_34172_static.bin"),
    ("fr-67482", "strasbourg_67482_static.bin"),
    ("fr-33063", "bordeaux_33063_static.bin"),
    ("fr-59350", "lille_59350_static.bin"),
];

/// Raw columns of one share mode in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeColumns {
    pub time_min: f64,
    pub dist_km: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticZoneRecord {
    pub zone_id: String,
    pub local_admin_unit_id: String,
    pub geometry: ZoneGeometry,
    /// Indexed by [`ShareMode::index`].
    pub modes: [ModeColumns; 7],
}

impl StaticZoneRecord {
    pub fn columns(&self, mode: ShareMode) -> &ModeColumns {
        &self.modes[mode.index()]
    }

    /// Indicators of this zone restricted to the `active` share columns.
    pub fn derive(&self, active: &[ShareMode]) -> ZoneRecord {
        let mut shares = ModeShares::default();
        for mode in ShareMode::ALL {
            shares.set(mode, self.columns(mode).share);
        }

        let share_sum = shares.sum_over(active);
        let weighted_time: f64 = active
            .iter()
            .map(|mode| self.columns(*mode).time_min * self.columns(*mode).share)
            .sum();
        let average_travel_time = if share_sum > 0.0 {
            weighted_time / share_sum
        } else {
            0.0
        };

        renormalize(&mut shares, active);
        let total_distance_km = active
            .iter()
            .map(|mode| self.columns(*mode).dist_km * shares.get(*mode))
            .sum();

        ZoneRecord {
            zone_id: self.zone_id.clone(),
            local_admin_unit_id: self.local_admin_unit_id.clone(),
            geometry: self.geometry.clone(),
            average_travel_time,
            total_distance_km,
            total_time_min: total_time_minutes(average_travel_time),
            shares,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticCityDataset {
    pub location: String,
    pub zones: Vec<StaticZoneRecord>,
}

impl StaticCityDataset {
    /// Load from a bincode-serialized file.
    pub fn from_file(path: &Path) -> Result<Self, StaticDataError> {
        let data = fs::read(path).map_err(|source| StaticDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        bincode::deserialize(&data).map_err(|error| StaticDataError::Decode {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }

    /// Serialize the dataset to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), StaticDataError> {
        let data = bincode::serialize(self).map_err(|error| StaticDataError::Encode(error.to_string()))?;
        fs::write(path, data).map_err(|source| StaticDataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn derive(&self, params: &ModeParams) -> ScenarioResult {
        let active = params.active_share_modes();
        let zones = self.zones.iter().map(|zone| zone.derive(&active)).collect();
        ScenarioResult::from_zones(self.location.clone(), ScenarioSource::Static, zones)
    }
}

/// Loads precomputed datasets and keeps the decoded records in memory.
pub struct StaticDataLoader {
    base_dir: PathBuf,
    catalog: HashMap<String, String>,
    resident: Mutex<HashMap<String, Arc<StaticCityDataset>>>,
}

impl StaticDataLoader {
    /// Loader over `base_dir` with the default city catalog.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let catalog = DEFAULT_CATALOG
            .iter()
            .map(|(location, file)| (location.to_string(), file.to_string()))
            .collect();
        Self {
            base_dir: base_dir.into(),
            catalog,
            resident: Mutex::new(HashMap::new()),
        }
    }

    /// Add or replace the dataset file of a location.
    pub fn with_entry(mut self, location: &str, file_name: &str) -> Self {
        self.catalog.insert(location.to_string(), file_name.to_string());
        self
    }

    pub fn file_for(&self, location: &str) -> Option<PathBuf> {
        self.catalog.get(location).map(|file| self.base_dir.join(file))
    }

    /// Number of decoded datasets currently held in memory.
    pub fn resident_count(&self) -> usize {
        self.resident.lock().map(|resident| resident.len()).unwrap_or(0)
    }

    /// Mode-filtered scenario for `location`, or `None` when no usable static
    /// data exists. The radius does not select among datasets; each city has a
    /// single dataset precomputed at a fixed radius.
    pub fn load(&self, location: &str, _radius_km: f64, params: &ModeParams) -> Option<ScenarioResult> {
        let file_name = self.catalog.get(location)?;
        if params.active_share_modes().is_empty() {
            return None;
        }
        let dataset = self.resident_dataset(file_name)?;
        Some(dataset.derive(params))
    }

    fn resident_dataset(&self, file_name: &str) -> Option<Arc<StaticCityDataset>> {
        if let Ok(resident) = self.resident.lock() {
            if let Some(dataset) = resident.get(file_name) {
                debug!(file = file_name, "static dataset served from memory");
                return Some(Arc::clone(dataset));
            }
        }

        let path = self.base_dir.join(file_name);
        if !path.exists() {
            debug!(path = %path.display(), "no static dataset on disk");
            return None;
        }
        let dataset = match StaticCityDataset::from_file(&path) {
            Ok(dataset) => Arc::new(dataset),
            Err(error) => {
                warn!(%error, "failed to load static dataset, ignoring it");
                return None;
            }
        };
        info!(path = %path.display(), zones = dataset.zones.len(), "loaded static dataset");

        match self.resident.lock() {
            Ok(mut resident) => Some(Arc::clone(
                resident.entry(file_name.to_string()).or_insert(dataset),
            )),
            // Poisoned map: serve this copy without keeping it resident.
            Err(_) => Some(dataset),
        }
    }
}
