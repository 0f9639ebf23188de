mod support;

use std::time::Duration;

use scenario_core::modes::{ModeParams, ShareMode, TransportMode};
use scenario_core::zone_provider::ZoneProviderKind;
use scenario_core::{EngineConfig, ScenarioSource};
use scenario_sessions::session::MESSAGE_DONE;
use scenario_sessions::{SchedulerConfig, SessionStatus, SimulationManager};
use tokio::runtime::Handle;

use support::wait_until_settled;

fn manager(engine_config: EngineConfig) -> SimulationManager {
    SimulationManager::from_configs(&engine_config, &SchedulerConfig::default(), Handle::current())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn car_only_simulation_end_to_end() {
    let manager = manager(EngineConfig::default());
    assert_eq!(manager.get_status("s1").status, SessionStatus::Idle);

    manager.start_simulation("s1", "75056", 15.0, Some(ModeParams::only(&[TransportMode::Car])));
    let status = wait_until_settled(&manager, "s1", Duration::from_secs(30)).await;
    assert_eq!(status.status, SessionStatus::Ready);
    assert_eq!(status.progress, 100);
    assert_eq!(status.message, MESSAGE_DONE);
    assert!(status.error.is_none());

    let result = manager.get_data("s1").expect("ready session has data");
    assert_eq!(result.location, "fr-75056");
    assert!(!result.zones.is_empty());
    for zone in &result.zones {
        assert!((zone.shares.car - 1.0).abs() < 1e-9);
        for mode in ShareMode::ALL.into_iter().filter(|m| *m != ShareMode::Car) {
            assert_eq!(zone.shares.get(mode), 0.0);
        }
        assert_eq!(zone.shares.public_transport, 0.0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unavailable_zone_model_still_completes_with_fallback() {
    let manager = manager(EngineConfig::default().with_zone_provider(ZoneProviderKind::Unavailable));
    manager.start_simulation("s1", "13055", 10.0, None);
    let status = wait_until_settled(&manager, "s1", Duration::from_secs(10)).await;

    assert_eq!(status.status, SessionStatus::Ready);
    let result = manager.get_data("s1").expect("data");
    assert_eq!(result.source, ScenarioSource::Fallback);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sessions_share_cached_default_results_until_cleared() {
    let manager = manager(EngineConfig::default());
    for id in ["a", "b"] {
        manager
            .start_simulation(id, "69123", 5.0, None)
            .expect("spawned")
            .await
            .expect("task");
    }
    let a = manager.get_data("a").expect("a");
    let b = manager.get_data("b").expect("b");
    assert!(std::sync::Arc::ptr_eq(&a, &b));

    manager.clear_cache();
    manager
        .start_simulation("c", "69123", 5.0, None)
        .expect("spawned")
        .await
        .expect("task");
    let c = manager.get_data("c").expect("c");
    assert!(!std::sync::Arc::ptr_eq(&a, &c));
    assert_eq!(*a, *c);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn status_serializes_for_clients() {
    let manager = manager(EngineConfig::default());
    let json = serde_json::to_value(manager.get_status("fresh")).expect("serialize");
    assert_eq!(json["status"], "idle");
    assert_eq!(json["progress"], 0);
    assert!(json["error"].is_null());
}
