//! LRU cache of default-parameter scenarios keyed by (location, radius).

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::scenario::{normalize_location, ScenarioResult};

/// Default number of cached scenarios.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Radii are compared at 4 decimal places (0.1 m).
const RADIUS_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub location: String,
    radius_scaled: i64,
}

impl CacheKey {
    /// Normalizes the location and rounds the radius to 4 decimal places.
    pub fn new(location: &str, radius_km: f64) -> Self {
        Self {
            location: normalize_location(location),
            radius_scaled: (radius_km * RADIUS_SCALE).round() as i64,
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_scaled as f64 / RADIUS_SCALE
    }
}

/// Thread-safe LRU of shared scenario results.
///
/// The lock is never held while a scenario is computed; two concurrent misses
/// on the same key both compute and the later insert wins.
pub struct ResultCache {
    cache: Mutex<LruCache<CacheKey, Arc<ScenarioResult>>>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ScenarioResult>> {
        let mut cache = self.cache.lock().ok()?;
        cache.get(key).cloned()
    }

    pub fn put(&self, key: CacheKey, result: Arc<ScenarioResult>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, result);
        }
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> Arc<ScenarioResult>
    where
        F: FnOnce(&CacheKey) -> ScenarioResult,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let result = Arc::new(compute(&key));
        self.put(key, Arc::clone(&result));
        result
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
