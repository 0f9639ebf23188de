//! Transport modes and the per-mode parameters a scenario request carries.
//!
//! Two mode vocabularies exist:
//!
//! - **`TransportMode`**: the five modes a user toggles and prices (car, bicycle,
//!   walk, carpool, public transport).
//! - **`ShareMode`**: the seven share columns stored per zone. Public transport is
//!   split into its access sub-modes (walk + PT, car + PT, bicycle + PT).
//!
//! `ModeParams` deserializes from the UI parameter mapping, so the field aliases
//! below follow the names the front end sends.

use serde::{Deserialize, Serialize};

/// Default value of time applied to every mode (€/h).
pub const DEFAULT_TIME_VALUE_PER_HOUR: f64 = 12.0;
/// Default value of distance applied to every mode (€/km).
pub const DEFAULT_DISTANCE_VALUE_PER_KM: f64 = 0.01;
/// Default fixed cost per trip applied to every mode (€).
pub const DEFAULT_FIXED_COST: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Car,
    Bicycle,
    Walk,
    Carpool,
    PublicTransport,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Car,
        TransportMode::Bicycle,
        TransportMode::Walk,
        TransportMode::Carpool,
        TransportMode::PublicTransport,
    ];
}

/// A per-zone share column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareMode {
    Car,
    Bicycle,
    Walk,
    Carpool,
    PtWalk,
    PtCar,
    PtBicycle,
}

impl ShareMode {
    /// Canonical column order. Synthetic share draws follow this order.
    pub const ALL: [ShareMode; 7] = [
        ShareMode::Car,
        ShareMode::Bicycle,
        ShareMode::Walk,
        ShareMode::Carpool,
        ShareMode::PtWalk,
        ShareMode::PtCar,
        ShareMode::PtBicycle,
    ];

    pub const PUBLIC_TRANSPORT: [ShareMode; 3] =
        [ShareMode::PtWalk, ShareMode::PtCar, ShareMode::PtBicycle];

    /// The priced mode this share column belongs to.
    pub fn transport_mode(self) -> TransportMode {
        match self {
            ShareMode::Car => TransportMode::Car,
            ShareMode::Bicycle => TransportMode::Bicycle,
            ShareMode::Walk => TransportMode::Walk,
            ShareMode::Carpool => TransportMode::Carpool,
            ShareMode::PtWalk | ShareMode::PtCar | ShareMode::PtBicycle => {
                TransportMode::PublicTransport
            }
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            ShareMode::Car => "share_car",
            ShareMode::Bicycle => "share_bicycle",
            ShareMode::Walk => "share_walk",
            ShareMode::Carpool => "share_carpool",
            ShareMode::PtWalk => "share_pt_walk",
            ShareMode::PtCar => "share_pt_car",
            ShareMode::PtBicycle => "share_pt_bicycle",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ShareMode::Car => 0,
            ShareMode::Bicycle => 1,
            ShareMode::Walk => 2,
            ShareMode::Carpool => 3,
            ShareMode::PtWalk => 4,
            ShareMode::PtCar => 5,
            ShareMode::PtBicycle => 6,
        }
    }
}

/// Generalized cost vector of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeCosts {
    #[serde(alias = "cost_of_time_eur_per_h")]
    pub time_value_per_hour: f64,
    #[serde(alias = "cost_of_distance_eur_per_km")]
    pub distance_value_per_km: f64,
    #[serde(alias = "cost_constant")]
    pub fixed_cost: f64,
}

impl Default for ModeCosts {
    fn default() -> Self {
        Self {
            time_value_per_hour: DEFAULT_TIME_VALUE_PER_HOUR,
            distance_value_per_km: DEFAULT_DISTANCE_VALUE_PER_KM,
            fixed_cost: DEFAULT_FIXED_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeSettings {
    pub active: bool,
    #[serde(flatten)]
    pub costs: ModeCosts,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            active: true,
            costs: ModeCosts::default(),
        }
    }
}

impl ModeSettings {
    pub fn inactive() -> Self {
        Self {
            active: false,
            ..Self::default()
        }
    }
}

/// Public transport settings: the block toggle plus one flag per access sub-mode.
/// Sub-mode flags only matter while `active` is true.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicTransportSettings {
    pub active: bool,
    #[serde(flatten)]
    pub costs: ModeCosts,
    #[serde(alias = "pt_walk")]
    pub walk_pt: bool,
    #[serde(alias = "pt_car")]
    pub car_pt: bool,
    #[serde(alias = "pt_bicycle")]
    pub bicycle_pt: bool,
}

impl Default for PublicTransportSettings {
    fn default() -> Self {
        Self {
            active: true,
            costs: ModeCosts::default(),
            walk_pt: true,
            car_pt: true,
            bicycle_pt: true,
        }
    }
}

/// Per-mode activation and costs for one scenario request.
///
/// Missing keys on the wire take the defaults: every mode active, every public
/// transport sub-mode enabled, default costs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeParams {
    pub car: ModeSettings,
    pub bicycle: ModeSettings,
    pub walk: ModeSettings,
    pub carpool: ModeSettings,
    pub public_transport: PublicTransportSettings,
}

impl ModeParams {
    /// Parameters with exactly the given modes active (public transport with all
    /// sub-modes enabled when listed).
    pub fn only(modes: &[TransportMode]) -> Self {
        let mut params = Self::default();
        for mode in TransportMode::ALL {
            params.set_active(mode, modes.contains(&mode));
        }
        params
    }

    /// Parameters with every mode switched off.
    pub fn none_active() -> Self {
        Self::only(&[])
    }

    pub fn with_costs(mut self, mode: TransportMode, costs: ModeCosts) -> Self {
        match mode {
            TransportMode::Car => self.car.costs = costs,
            TransportMode::Bicycle => self.bicycle.costs = costs,
            TransportMode::Walk => self.walk.costs = costs,
            TransportMode::Carpool => self.carpool.costs = costs,
            TransportMode::PublicTransport => self.public_transport.costs = costs,
        }
        self
    }

    pub fn set_active(&mut self, mode: TransportMode, active: bool) {
        match mode {
            TransportMode::Car => self.car.active = active,
            TransportMode::Bicycle => self.bicycle.active = active,
            TransportMode::Walk => self.walk.active = active,
            TransportMode::Carpool => self.carpool.active = active,
            TransportMode::PublicTransport => self.public_transport.active = active,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn costs(&self, mode: TransportMode) -> ModeCosts {
        match mode {
            TransportMode::Car => self.car.costs,
            TransportMode::Bicycle => self.bicycle.costs,
            TransportMode::Walk => self.walk.costs,
            TransportMode::Carpool => self.carpool.costs,
            TransportMode::PublicTransport => self.public_transport.costs,
        }
    }

    /// Whether a share column is active. Public transport sub-modes are inactive
    /// whenever the public transport block is off, whatever their own flag says.
    pub fn is_share_active(&self, mode: ShareMode) -> bool {
        let pt = &self.public_transport;
        match mode {
            ShareMode::Car => self.car.active,
            ShareMode::Bicycle => self.bicycle.active,
            ShareMode::Walk => self.walk.active,
            ShareMode::Carpool => self.carpool.active,
            ShareMode::PtWalk => pt.active && pt.walk_pt,
            ShareMode::PtCar => pt.active && pt.car_pt,
            ShareMode::PtBicycle => pt.active && pt.bicycle_pt,
        }
    }

    /// Active share columns in canonical order.
    pub fn active_share_modes(&self) -> Vec<ShareMode> {
        ShareMode::ALL
            .into_iter()
            .filter(|mode| self.is_share_active(*mode))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_activate_every_share_column() {
        let params = ModeParams::default();
        assert_eq!(params.active_share_modes(), ShareMode::ALL.to_vec());
        assert!(params.is_default());
    }

    #[test]
    fn inactive_public_transport_disables_sub_modes() {
        let mut params = ModeParams::default();
        params.public_transport.active = false;
        params.public_transport.walk_pt = true;

        let active = params.active_share_modes();
        assert_eq!(
            active,
            vec![
                ShareMode::Car,
                ShareMode::Bicycle,
                ShareMode::Walk,
                ShareMode::Carpool
            ]
        );
    }

    #[test]
    fn only_car_leaves_a_single_column() {
        let params = ModeParams::only(&[TransportMode::Car]);
        assert_eq!(params.active_share_modes(), vec![ShareMode::Car]);
        assert!(ModeParams::none_active().active_share_modes().is_empty());
    }

    #[test]
    fn deserializes_front_end_parameter_names() {
        let json = r#"{
            "car": {"active": true, "cost_of_time_eur_per_h": 20.0},
            "walk": {"active": false},
            "public_transport": {"active": true, "pt_car": false, "cost_constant": 2.5}
        }"#;
        let params: ModeParams = serde_json::from_str(json).expect("valid params");

        assert_eq!(params.car.costs.time_value_per_hour, 20.0);
        assert_eq!(params.car.costs.distance_value_per_km, DEFAULT_DISTANCE_VALUE_PER_KM);
        assert!(!params.walk.active);
        assert!(params.bicycle.active);
        assert!(!params.public_transport.car_pt);
        assert!(params.public_transport.walk_pt);
        assert_eq!(params.public_transport.costs.fixed_cost, 2.5);
    }

    #[test]
    fn empty_mapping_is_default() {
        let params: ModeParams = serde_json::from_str("{}").expect("valid params");
        assert!(params.is_default());
    }
}
