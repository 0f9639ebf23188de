#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use scenario_core::test_helpers::{EngineBehavior, ScriptedEngine};
use scenario_core::ScenarioEngine;
use scenario_sessions::{SchedulerConfig, SessionSnapshot, SessionStatus, SimulationManager};
use tokio::runtime::Handle;

/// Poll until the session leaves `loading`, or panic after `limit`.
pub async fn wait_until_settled(
    manager: &SimulationManager,
    session_id: &str,
    limit: Duration,
) -> SessionSnapshot {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        let status = manager.get_status(session_id);
        if status.status != SessionStatus::Loading {
            return status;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "session {session_id} still loading after {limit:?}: {status:?}"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Manager over a scripted engine, running on the current runtime.
pub fn scripted_manager(
    behavior: EngineBehavior,
    delay: Duration,
    config: SchedulerConfig,
) -> (SimulationManager, Arc<ScriptedEngine>) {
    let engine = ScriptedEngine::new(behavior, delay);
    let shared: Arc<dyn ScenarioEngine> = engine.clone();
    let manager = SimulationManager::new(shared, &config, Handle::current());
    (manager, engine)
}
