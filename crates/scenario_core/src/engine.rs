//! The scenario engine seen by the session layer: computer plus result cache.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{CacheKey, ResultCache};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::modes::ModeParams;
use crate::scenario::{ScenarioComputer, ScenarioResult};
use crate::static_data::StaticDataLoader;
use crate::zone_provider::build_zone_provider;

/// One simulation request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Raw location code; normalized by the engine.
    pub location: String,
    pub radius_km: f64,
    #[serde(default)]
    pub mode_params: Option<ModeParams>,
}

impl ScenarioRequest {
    pub fn new(location: impl Into<String>, radius_km: f64) -> Self {
        Self {
            location: location.into(),
            radius_km,
            mode_params: None,
        }
    }

    pub fn with_mode_params(mut self, params: ModeParams) -> Self {
        self.mode_params = Some(params);
        self
    }

    /// Requests without explicit (non-default) parameters share cached results.
    pub fn is_cacheable(&self) -> bool {
        self.mode_params.map_or(true, |params| params.is_default())
    }
}

/// Blocking scenario computation, callable from any thread.
pub trait ScenarioEngine: Send + Sync {
    fn compute(&self, request: &ScenarioRequest) -> EngineResult<Arc<ScenarioResult>>;

    /// Drop cached results, if the engine keeps any.
    fn clear_cache(&self) {}
}

pub struct ScenarioService {
    computer: ScenarioComputer,
    cache: ResultCache,
}

impl ScenarioService {
    pub fn new(computer: ScenarioComputer, cache_capacity: usize) -> Self {
        Self {
            computer,
            cache: ResultCache::new(cache_capacity),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut computer = ScenarioComputer::new(build_zone_provider(&config.zone_provider))
            .with_seed(config.seed)
            .with_coefficients(config.coefficients)
            .with_share_ranges(config.share_ranges);
        if let Some(dir) = &config.static_data_dir {
            computer = computer.with_static_data(StaticDataLoader::new(dir.clone()));
        }
        Self::new(computer, config.cache_capacity)
    }

    pub fn computer(&self) -> &ScenarioComputer {
        &self.computer
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn scenario(&self, request: &ScenarioRequest) -> Arc<ScenarioResult> {
        info!(location = %request.location, radius_km = request.radius_km, "computing scenario");
        if !request.is_cacheable() {
            return Arc::new(self.computer.compute(
                &request.location,
                request.radius_km,
                request.mode_params.as_ref(),
            ));
        }

        let key = CacheKey::new(&request.location, request.radius_km);
        if let Some(hit) = self.cache.get(&key) {
            debug!(location = %key.location, radius_km = key.radius_km(), "scenario cache hit");
            return hit;
        }
        self.cache
            .get_or_compute(key, |key| self.computer.compute(&key.location, key.radius_km(), None))
    }
}

impl ScenarioEngine for ScenarioService {
    fn compute(&self, request: &ScenarioRequest) -> EngineResult<Arc<ScenarioResult>> {
        Ok(self.scenario(request))
    }

    fn clear_cache(&self) {
        self.cache.clear();
        info!("scenario cache cleared");
    }
}
