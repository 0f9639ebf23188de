use std::time::Duration;

use scenario_core::config::env_value;

pub const DEFAULT_MAX_SESSIONS: usize = 100;
pub const DEFAULT_MAX_CONCURRENT_SIMULATIONS: usize = 1;
pub const DEFAULT_PERMIT_TIMEOUT: Duration = Duration::from_secs(600);

pub const ENV_MAX_SESSIONS: &str = "SCENARIO_MAX_SESSIONS";
pub const ENV_MAX_CONCURRENT_SIMULATIONS: &str = "SCENARIO_MAX_CONCURRENT_SIMULATIONS";
pub const ENV_PERMIT_TIMEOUT_SECS: &str = "SCENARIO_PERMIT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Sessions kept before the least recently accessed one is evicted.
    pub max_sessions: usize,
    /// Simulations allowed to compute at the same time, process-wide.
    pub max_concurrent_simulations: usize,
    /// How long a queued simulation waits for a slot before failing as busy.
    pub permit_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_concurrent_simulations: DEFAULT_MAX_CONCURRENT_SIMULATIONS,
            permit_timeout: DEFAULT_PERMIT_TIMEOUT,
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    pub fn with_max_concurrent_simulations(mut self, permits: usize) -> Self {
        self.max_concurrent_simulations = permits;
        self
    }

    pub fn with_permit_timeout(mut self, timeout: Duration) -> Self {
        self.permit_timeout = timeout;
        self
    }

    /// Defaults overlaid with `SCENARIO_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(max_sessions) = env_value(ENV_MAX_SESSIONS) {
            config.max_sessions = max_sessions;
        }
        if let Some(permits) = env_value(ENV_MAX_CONCURRENT_SIMULATIONS) {
            config.max_concurrent_simulations = permits;
        }
        if let Some(secs) = env_value(ENV_PERMIT_TIMEOUT_SECS) {
            config.permit_timeout = Duration::from_secs(secs);
        }
        config
    }
}
