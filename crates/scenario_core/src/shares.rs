//! Per-zone modal shares and renormalization over the active modes.

use serde::{Deserialize, Serialize};

use crate::modes::ShareMode;

/// Modal shares of one zone. `public_transport` is derived: it always equals
/// the sum of the three public transport sub-mode shares once
/// [`ModeShares::refresh_public_transport`] or [`renormalize`] has run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeShares {
    pub car: f64,
    pub bicycle: f64,
    pub walk: f64,
    pub carpool: f64,
    pub pt_walk: f64,
    pub pt_car: f64,
    pub pt_bicycle: f64,
    pub public_transport: f64,
}

impl ModeShares {
    pub fn get(&self, mode: ShareMode) -> f64 {
        match mode {
            ShareMode::Car => self.car,
            ShareMode::Bicycle => self.bicycle,
            ShareMode::Walk => self.walk,
            ShareMode::Carpool => self.carpool,
            ShareMode::PtWalk => self.pt_walk,
            ShareMode::PtCar => self.pt_car,
            ShareMode::PtBicycle => self.pt_bicycle,
        }
    }

    pub fn set(&mut self, mode: ShareMode, value: f64) {
        match mode {
            ShareMode::Car => self.car = value,
            ShareMode::Bicycle => self.bicycle = value,
            ShareMode::Walk => self.walk = value,
            ShareMode::Carpool => self.carpool = value,
            ShareMode::PtWalk => self.pt_walk = value,
            ShareMode::PtCar => self.pt_car = value,
            ShareMode::PtBicycle => self.pt_bicycle = value,
        }
    }

    pub fn sum_over(&self, modes: &[ShareMode]) -> f64 {
        modes.iter().map(|mode| self.get(*mode)).sum()
    }

    pub fn refresh_public_transport(&mut self) {
        self.public_transport = self.pt_walk + self.pt_car + self.pt_bicycle;
    }
}

/// Rescale `shares` so the `active` columns sum to 1 and every other column is 0.
///
/// A zone whose active shares sum to zero ends up with all shares at 0.
pub fn renormalize(shares: &mut ModeShares, active: &[ShareMode]) {
    let total = shares.sum_over(active);
    for mode in ShareMode::ALL {
        let value = if total > 0.0 && active.contains(&mode) {
            shares.get(mode) / total
        } else {
            0.0
        };
        shares.set(mode, value);
    }
    shares.refresh_public_transport();
}
