//! Scenario computation: location normalization, the model and static paths,
//! and the fallback dataset.

mod compute;
mod fallback;
mod location;
mod result;
mod synthetic;

pub use compute::ScenarioComputer;
pub use fallback::{
    fallback_scenario, FALLBACK_ADMIN_UNIT, FALLBACK_CENTER, FALLBACK_RADIUS_KM, FALLBACK_ZONE_ID,
};
pub use location::{normalize_location, DEFAULT_LOCATION};
pub use result::{FlowRecord, ScenarioResult, ScenarioSource, ZoneLookupEntry, ZoneRecord};
pub use synthetic::{draw_raw_shares, ShareRanges, DEFAULT_SEED};
