use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::metrics::{distance_proxy_km, total_time_minutes, ModeWeights, WeightCoefficients};
use crate::modes::{ModeParams, ShareMode};
use crate::shares::renormalize;
use crate::static_data::StaticDataLoader;
use crate::zone_provider::{ZoneFeature, ZoneProvider};

use super::fallback::fallback_scenario;
use super::location::normalize_location;
use super::result::{ScenarioResult, ScenarioSource, ZoneRecord};
use super::synthetic::{draw_raw_shares, ShareRanges, DEFAULT_SEED};

/// Produces one scenario per call: static data when available, the zone model
/// otherwise, and the fallback dataset when neither yields zones.
pub struct ScenarioComputer {
    zone_provider: Box<dyn ZoneProvider>,
    static_data: Option<StaticDataLoader>,
    seed: u64,
    coefficients: WeightCoefficients,
    share_ranges: ShareRanges,
}

impl ScenarioComputer {
    pub fn new(zone_provider: Box<dyn ZoneProvider>) -> Self {
        Self {
            zone_provider,
            static_data: None,
            seed: DEFAULT_SEED,
            coefficients: WeightCoefficients::default(),
            share_ranges: ShareRanges::default(),
        }
    }

    pub fn with_static_data(mut self, loader: StaticDataLoader) -> Self {
        self.static_data = Some(loader);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
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

    pub fn static_data(&self) -> Option<&StaticDataLoader> {
        self.static_data.as_ref()
    }

    /// Compute the scenario for a raw location code. `None` params means all
    /// modes active with default costs.
    pub fn compute(&self, location: &str, radius_km: f64, params: Option<&ModeParams>) -> ScenarioResult {
        let location = normalize_location(location);
        let params = params.copied().unwrap_or_default();
        let active = params.active_share_modes();
        if active.is_empty() {
            info!(%location, "no active modes, using fallback scenario");
            return fallback_scenario();
        }

        if let Some(loader) = &self.static_data {
            if let Some(result) = loader.load(&location, radius_km, &params) {
                debug!(%location, zones = result.zones.len(), "scenario served from static data");
                return result;
            }
        }

        let features = match self.zone_provider.zones(&location, radius_km) {
            Ok(features) if !features.is_empty() => features,
            Ok(_) => {
                warn!(%location, radius_km, "zone model returned no zones, using fallback scenario");
                return fallback_scenario();
            }
            Err(error) => {
                warn!(%location, radius_km, %error, "zone model failed, using fallback scenario");
                return fallback_scenario();
            }
        };

        self.model_scenario(location, features, &params, &active)
    }

    fn model_scenario(
        &self,
        location: String,
        features: Vec<ZoneFeature>,
        params: &ModeParams,
        active: &[ShareMode],
    ) -> ScenarioResult {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let raw_shares = draw_raw_shares(features.len(), active, &self.share_ranges, &mut rng);
        let weights = ModeWeights::from_params(params, &self.coefficients);

        let zones = features
            .into_iter()
            .zip(raw_shares)
            .map(|(feature, mut shares)| {
                renormalize(&mut shares, active);
                let average_travel_time = weights.average_travel_time(&shares);
                ZoneRecord {
                    total_distance_km: distance_proxy_km(feature.geometry.area_m2()),
                    total_time_min: total_time_minutes(average_travel_time),
                    average_travel_time,
                    zone_id: feature.zone_id,
                    local_admin_unit_id: feature.local_admin_unit_id,
                    geometry: feature.geometry,
                    shares,
                }
            })
            .collect::<Vec<_>>();

        info!(%location, zones = zones.len(), "computed model scenario");
        ScenarioResult::from_zones(location, ScenarioSource::Model, zones)
    }
}
