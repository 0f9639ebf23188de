//! Error types for the scenario engine.

use std::path::PathBuf;

/// Failures of the external zone model. Every variant makes the computer fall
/// back to the synthetic dataset; none reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum ZoneProviderError {
    #[error("Zone model unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Invalid radius: {0} km")]
    InvalidRadius(f64),
}

/// Failures reading or writing a precomputed city dataset.
#[derive(Debug, thiserror::Error)]
pub enum StaticDataError {
    #[error("Failed to read static dataset: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode static dataset {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode static dataset: {0}")]
    Encode(String),
}

/// Failure of a scenario computation, as reported to the session layer.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario computation failed: {0}")]
    Computation(String),
}

pub type EngineResult<T> = Result<T, ScenarioError>;
