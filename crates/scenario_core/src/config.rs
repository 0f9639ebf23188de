//! Engine configuration: plain values with defaults, builders and an
//! environment overlay.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::metrics::WeightCoefficients;
use crate::scenario::{ShareRanges, DEFAULT_SEED};
use crate::zone_provider::ZoneProviderKind;

pub const ENV_CACHE_CAPACITY: &str = "SCENARIO_CACHE_CAPACITY";
pub const ENV_SEED: &str = "SCENARIO_SEED";
pub const ENV_STATIC_DATA_DIR: &str = "SCENARIO_STATIC_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of default-parameter scenarios kept in the result cache.
    pub cache_capacity: usize,
    /// Seed of the synthetic share generator.
    pub seed: u64,
    pub zone_provider: ZoneProviderKind,
    /// Directory of precomputed city datasets; `None` disables static data.
    pub static_data_dir: Option<PathBuf>,
    pub coefficients: WeightCoefficients,
    pub share_ranges: ShareRanges,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            seed: DEFAULT_SEED,
            zone_provider: ZoneProviderKind::default(),
            static_data_dir: None,
            coefficients: WeightCoefficients::default(),
            share_ranges: ShareRanges::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_zone_provider(mut self, kind: ZoneProviderKind) -> Self {
        self.zone_provider = kind;
        self
    }

    pub fn with_static_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_data_dir = Some(dir.into());
        self
    }

    pub fn with_coefficients(mut self, coefficients: WeightCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_share_ranges(mut self, share_ranges: ShareRanges) -> Self {
        self.share_ranges = share_ranges;
        self
    }

    /// Defaults overlaid with `SCENARIO_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(capacity) = env_value(ENV_CACHE_CAPACITY) {
            config.cache_capacity = capacity;
        }
        if let Some(seed) = env_value(ENV_SEED) {
            config.seed = seed;
        }
        if let Ok(dir) = env::var(ENV_STATIC_DATA_DIR) {
            if !dir.trim().is_empty() {
                config.static_data_dir = Some(PathBuf::from(dir));
            }
        }
        config
    }
}

/// Parsed value of an environment variable; unparseable values are logged and
/// ignored.
pub fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}
