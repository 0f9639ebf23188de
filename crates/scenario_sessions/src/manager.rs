use std::sync::Arc;

use scenario_core::{
    EngineConfig, ModeParams, ScenarioEngine, ScenarioRequest, ScenarioResult, ScenarioService,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::SchedulerConfig;
use crate::scheduler::SimulationScheduler;
use crate::session::SessionSnapshot;
use crate::store::SessionStore;

/// Client-facing simulation API: start, poll, fetch, clear cache.
pub struct SimulationManager {
    store: Arc<SessionStore>,
    engine: Arc<dyn ScenarioEngine>,
    scheduler: SimulationScheduler,
}

impl SimulationManager {
    pub fn new(engine: Arc<dyn ScenarioEngine>, config: &SchedulerConfig, runtime: Handle) -> Self {
        let store = Arc::new(SessionStore::new(config.max_sessions));
        let scheduler = SimulationScheduler::new(
            Arc::clone(&store),
            Arc::clone(&engine),
            config,
            runtime,
        );
        Self {
            store,
            engine,
            scheduler,
        }
    }

    /// Manager over a [`ScenarioService`] built from `engine_config`.
    pub fn from_configs(
        engine_config: &EngineConfig,
        scheduler_config: &SchedulerConfig,
        runtime: Handle,
    ) -> Self {
        let engine: Arc<dyn ScenarioEngine> = Arc::new(ScenarioService::from_config(engine_config));
        Self::new(engine, scheduler_config, runtime)
    }

    /// Fire-and-forget start; a no-op while the session is already loading.
    /// The handle is only useful to callers that want to await completion.
    pub fn start_simulation(
        &self,
        session_id: &str,
        location: &str,
        radius_km: f64,
        mode_params: Option<ModeParams>,
    ) -> Option<JoinHandle<()>> {
        let request = ScenarioRequest {
            location: location.to_string(),
            radius_km,
            mode_params,
        };
        self.scheduler.start(session_id, request)
    }

    pub fn get_status(&self, session_id: &str) -> SessionSnapshot {
        self.store.get_status(session_id)
    }

    pub fn get_data(&self, session_id: &str) -> Option<Arc<ScenarioResult>> {
        self.store.get_data(session_id)
    }

    pub fn clear_cache(&self) {
        self.engine.clear_cache();
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.store
    }
}
