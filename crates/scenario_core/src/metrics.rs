//! Synthetic travel-time weights and aggregate zone indicators.
//!
//! Each mode gets a time weight (minutes) from a base duration plus a linear
//! combination of its cost vector. The coefficients are illustrative defaults
//! tuned for presentation, not calibrated transport-model outputs; they are
//! exposed through [`WeightCoefficients`] so deployments can override them.

use serde::{Deserialize, Serialize};

use crate::modes::{ModeCosts, ModeParams, TransportMode};
use crate::shares::ModeShares;

/// Total trip time is reported as this multiple of the average travel time.
pub const TOTAL_TIME_FACTOR: f64 = 1.2;

/// Base duration per mode in minutes, before cost terms are added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseMinutes {
    pub car: f64,
    pub bicycle: f64,
    pub walk: f64,
    pub carpool: f64,
    pub public_transport: f64,
}

impl Default for BaseMinutes {
    fn default() -> Self {
        Self {
            car: 20.0,
            bicycle: 15.0,
            walk: 25.0,
            carpool: 18.0,
            public_transport: 22.0,
        }
    }
}

impl BaseMinutes {
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.car,
            TransportMode::Bicycle => self.bicycle,
            TransportMode::Walk => self.walk,
            TransportMode::Carpool => self.carpool,
            TransportMode::PublicTransport => self.public_transport,
        }
    }
}

/// weight = base + time_value · €/h + distance_value · €/km + fixed_cost · €
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightCoefficients {
    pub base_minutes: BaseMinutes,
    pub time_value: f64,
    pub distance_value: f64,
    pub fixed_cost: f64,
}

impl Default for WeightCoefficients {
    fn default() -> Self {
        Self {
            base_minutes: BaseMinutes::default(),
            time_value: 0.6,
            distance_value: 4.0,
            fixed_cost: 0.8,
        }
    }
}

impl WeightCoefficients {
    pub fn weight(&self, base_minutes: f64, costs: &ModeCosts) -> f64 {
        base_minutes
            + self.time_value * costs.time_value_per_hour
            + self.distance_value * costs.distance_value_per_km
            + self.fixed_cost * costs.fixed_cost
    }
}

/// Time weight of each priced mode for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeWeights {
    pub car: f64,
    pub bicycle: f64,
    pub walk: f64,
    pub carpool: f64,
    pub public_transport: f64,
}

impl ModeWeights {
    pub fn from_params(params: &ModeParams, coefficients: &WeightCoefficients) -> Self {
        let weight = |mode: TransportMode| {
            coefficients.weight(coefficients.base_minutes.get(mode), &params.costs(mode))
        };
        Self {
            car: weight(TransportMode::Car),
            bicycle: weight(TransportMode::Bicycle),
            walk: weight(TransportMode::Walk),
            carpool: weight(TransportMode::Carpool),
            public_transport: weight(TransportMode::PublicTransport),
        }
    }

    /// Share-weighted travel time. Public transport contributes through its
    /// aggregate share, so sub-modes share one weight. Inactive modes carry a
    /// zero share and drop out of the sum.
    pub fn average_travel_time(&self, shares: &ModeShares) -> f64 {
        shares.car * self.car
            + shares.bicycle * self.bicycle
            + shares.walk * self.walk
            + shares.carpool * self.carpool
            + shares.public_transport * self.public_transport
    }
}

/// Typical trip distance proxy: square root of the zone area, in km.
pub fn distance_proxy_km(area_m2: f64) -> f64 {
    area_m2.max(0.0).sqrt() / 1000.0
}

pub fn total_time_minutes(average_travel_time: f64) -> f64 {
    average_travel_time * TOTAL_TIME_FACTOR
}
