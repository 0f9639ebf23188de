pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod modes;
pub mod scenario;
pub mod shares;
pub mod static_data;
pub mod zone_provider;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::EngineConfig;
pub use engine::{ScenarioEngine, ScenarioRequest, ScenarioService};
pub use error::{EngineResult, ScenarioError};
pub use modes::{ModeParams, ShareMode, TransportMode};
pub use scenario::{ScenarioResult, ScenarioSource};
