//! Runs simulations in the background under a process-wide concurrency gate.
//!
//! `start` returns immediately. The spawned task queues for a semaphore
//! permit (bounded wait), reports progress into the [`SessionStore`], runs the
//! blocking engine call on the blocking pool and records the outcome. Failures
//! of any kind, panics included, end up as session errors.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use scenario_core::{ScenarioEngine, ScenarioRequest};
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::SchedulerConfig;
use crate::error::SessionError;
use crate::session::{
    MESSAGE_FINALIZING, MESSAGE_PREPARING, MESSAGE_RUNNING, PROGRESS_FINALIZING,
    PROGRESS_PREPARING, PROGRESS_RUNNING,
};
use crate::store::SessionStore;

pub struct SimulationScheduler {
    store: Arc<SessionStore>,
    engine: Arc<dyn ScenarioEngine>,
    permits: Arc<Semaphore>,
    permit_timeout: Duration,
    runtime: Handle,
}

impl SimulationScheduler {
    pub fn new(
        store: Arc<SessionStore>,
        engine: Arc<dyn ScenarioEngine>,
        config: &SchedulerConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            store,
            engine,
            permits: Arc::new(Semaphore::new(config.max_concurrent_simulations.max(1))),
            permit_timeout: config.permit_timeout,
            runtime,
        }
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Start a simulation for `session_id`. Returns `None` when one is already
    /// running for that session.
    pub fn start(&self, session_id: &str, request: ScenarioRequest) -> Option<JoinHandle<()>> {
        let Some(run) = self.store.set_running(session_id) else {
            debug!(session_id, "simulation already running, ignoring start");
            return None;
        };
        info!(
            session_id,
            run,
            location = %request.location,
            radius_km = request.radius_km,
            "simulation queued"
        );

        let task = SimulationTask {
            session_id: session_id.to_string(),
            run,
            request,
            store: Arc::clone(&self.store),
            engine: Arc::clone(&self.engine),
            permits: Arc::clone(&self.permits),
            permit_timeout: self.permit_timeout,
        };
        Some(self.runtime.spawn(task.execute()))
    }
}

struct SimulationTask {
    session_id: String,
    run: u64,
    request: ScenarioRequest,
    store: Arc<SessionStore>,
    engine: Arc<dyn ScenarioEngine>,
    permits: Arc<Semaphore>,
    permit_timeout: Duration,
}

impl SimulationTask {
    async fn execute(self) {
        let id = self.session_id.as_str();
        let run = self.run;
        let permit = match tokio::time::timeout(
            self.permit_timeout,
            Arc::clone(&self.permits).acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                self.store.fail(id, run, &SessionError::SchedulerClosed);
                return;
            }
            Err(_) => {
                warn!(session_id = id, timeout = ?self.permit_timeout, "no simulation slot, giving up");
                self.store.fail(id, run, &SessionError::Busy);
                return;
            }
        };
        info!(session_id = id, "simulation slot acquired");

        self.store
            .report_progress(id, run, PROGRESS_PREPARING, MESSAGE_PREPARING);
        self.store
            .report_progress(id, run, PROGRESS_RUNNING, MESSAGE_RUNNING);

        let engine = Arc::clone(&self.engine);
        let request = self.request.clone();
        let outcome = tokio::task::spawn_blocking(move || engine.compute(&request)).await;

        match outcome {
            Ok(Ok(result)) => {
                self.store
                    .report_progress(id, run, PROGRESS_FINALIZING, MESSAGE_FINALIZING);
                info!(session_id = id, zones = result.zones.len(), "simulation complete");
                self.store.complete(id, run, result);
            }
            Ok(Err(scenario_error)) => {
                let failure = SessionError::from(scenario_error);
                error!(session_id = id, error = %failure, "simulation failed");
                self.store.fail(id, run, &failure);
            }
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic())
                } else {
                    join_error.to_string()
                };
                error!(session_id = id, %message, "simulation panicked");
                self.store.fail(id, run, &SessionError::Panicked(message));
            }
        }
        drop(permit);
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .unwrap_or_else(|| "unknown panic".to_string()),
    }
}
