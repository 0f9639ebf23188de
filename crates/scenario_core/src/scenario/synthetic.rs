use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::modes::ShareMode;
use crate::shares::ModeShares;

/// Seed of the synthetic share generator.
pub const DEFAULT_SEED: u64 = 42;

/// Half-open `[low, high)` range each raw share is drawn from, indexed by
/// [`ShareMode::index`]. Like the weight coefficients, these are illustrative
/// presentation defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareRanges(pub [(f64, f64); 7]);

impl Default for ShareRanges {
    fn default() -> Self {
        Self([
            (0.25, 0.65), // car
            (0.05, 0.25), // bicycle
            (0.05, 0.30), // walk
            (0.03, 0.20), // carpool
            (0.03, 0.15), // walk + PT
            (0.02, 0.12), // car + PT
            (0.01, 0.08), // bicycle + PT
        ])
    }
}

impl ShareRanges {
    pub fn get(&self, mode: ShareMode) -> (f64, f64) {
        self.0[mode.index()]
    }
}

/// Raw (unnormalized) shares for `zone_count` zones.
///
/// Columns are filled in canonical [`ShareMode::ALL`] order, one draw per zone,
/// and only for active columns; inactive columns stay at 0. Reusing a generator
/// seeded identically reproduces identical draws.
pub fn draw_raw_shares<R: Rng>(
    zone_count: usize,
    active: &[ShareMode],
    ranges: &ShareRanges,
    rng: &mut R,
) -> Vec<ModeShares> {
    let mut shares = vec![ModeShares::default(); zone_count];
    for mode in ShareMode::ALL {
        if !active.contains(&mode) {
            continue;
        }
        let (low, high) = ranges.get(mode);
        for zone in shares.iter_mut() {
            let value = if high > low {
                rng.gen_range(low..high)
            } else {
                low
            };
            zone.set(mode, value);
        }
    }
    for zone in shares.iter_mut() {
        zone.refresh_public_transport();
    }
    shares
}
