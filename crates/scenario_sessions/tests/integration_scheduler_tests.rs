mod support;

use std::time::Duration;

use scenario_core::test_helpers::EngineBehavior;
use scenario_sessions::session::{
    MESSAGE_DONE, MESSAGE_QUEUED, MESSAGE_RUNNING, PROGRESS_DONE, PROGRESS_QUEUED,
    PROGRESS_RUNNING,
};
use scenario_sessions::{SchedulerConfig, SessionStatus};

use support::{scripted_manager, wait_until_settled};

const SETTLE: Duration = Duration::from_secs(10);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn second_start_while_loading_is_ignored() {
    let (manager, engine) = scripted_manager(
        EngineBehavior::Succeed,
        Duration::from_millis(200),
        SchedulerConfig::default(),
    );

    let first = manager.start_simulation("s1", "75056", 10.0, None);
    let second = manager.start_simulation("s1", "75056", 10.0, None);
    assert!(first.is_some());
    assert!(second.is_none());

    first.expect("spawned").await.expect("task");
    assert_eq!(engine.calls(), 1);
    assert_eq!(manager.get_status("s1").status, SessionStatus::Ready);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_computations_never_exceed_the_permit_count() {
    let config = SchedulerConfig::default().with_max_concurrent_simulations(2);
    let (manager, engine) =
        scripted_manager(EngineBehavior::Succeed, Duration::from_millis(50), config);

    let handles: Vec<_> = (0..6)
        .filter_map(|i| manager.start_simulation(&format!("s{i}"), "75056", 10.0, None))
        .collect();
    assert_eq!(handles.len(), 6);
    for handle in handles {
        handle.await.expect("task");
    }

    assert_eq!(engine.calls(), 6);
    assert!(engine.max_running() <= 2, "peak {}", engine.max_running());
    for i in 0..6 {
        assert_eq!(manager.get_status(&format!("s{i}")).status, SessionStatus::Ready);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn queued_session_reports_waiting_then_times_out() {
    let config = SchedulerConfig::default().with_permit_timeout(Duration::from_millis(100));
    let (manager, engine) =
        scripted_manager(EngineBehavior::Succeed, Duration::from_millis(600), config);

    let busy = manager.start_simulation("busy", "75056", 10.0, None).expect("spawned");
    tokio::time::sleep(Duration::from_millis(30)).await;
    let queued = manager.start_simulation("queued", "75056", 10.0, None).expect("spawned");

    let waiting = manager.get_status("queued");
    assert_eq!(waiting.status, SessionStatus::Loading);
    assert_eq!(waiting.progress, PROGRESS_QUEUED);
    assert_eq!(waiting.message, MESSAGE_QUEUED);

    queued.await.expect("task");
    let timed_out = manager.get_status("queued");
    assert_eq!(timed_out.status, SessionStatus::Error);
    assert_eq!(timed_out.error.as_deref(), Some("Server busy (timeout)"));
    assert_eq!(timed_out.message, "Server busy (timeout)");
    assert!(manager.get_data("queued").is_none());

    busy.await.expect("task");
    assert_eq!(manager.get_status("busy").status, SessionStatus::Ready);
    assert_eq!(engine.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_errors_become_session_errors() {
    let (manager, _engine) = scripted_manager(
        EngineBehavior::Fail("zone model exploded".to_string()),
        Duration::ZERO,
        SchedulerConfig::default(),
    );
    manager.start_simulation("s1", "75056", 10.0, None);
    let status = wait_until_settled(&manager, "s1", SETTLE).await;

    assert_eq!(status.status, SessionStatus::Error);
    assert_eq!(
        status.error.as_deref(),
        Some("Scenario computation failed: zone model exploded")
    );
    assert_eq!(status.message, "Error: Scenario computation failed: zone model exploded");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panics_are_contained_and_release_the_slot() {
    let (manager, engine) = scripted_manager(
        EngineBehavior::Panic("index out of bounds".to_string()),
        Duration::ZERO,
        SchedulerConfig::default(),
    );
    manager
        .start_simulation("s1", "75056", 10.0, None)
        .expect("spawned")
        .await
        .expect("outer task survives the panic");

    let status = manager.get_status("s1");
    assert_eq!(status.status, SessionStatus::Error);
    assert!(status
        .error
        .as_deref()
        .is_some_and(|error| error.contains("index out of bounds")));

    // The permit was released: a restart runs the engine again.
    manager
        .start_simulation("s1", "75056", 10.0, None)
        .expect("restart after error")
        .await
        .expect("task");
    assert_eq!(engine.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn session_count_is_bounded() {
    let config = SchedulerConfig::default().with_max_sessions(3);
    let (manager, _engine) = scripted_manager(EngineBehavior::Succeed, Duration::ZERO, config);

    for i in 0..4 {
        manager
            .start_simulation(&format!("s{i}"), "75056", 10.0, None)
            .expect("spawned")
            .await
            .expect("task");
    }

    assert_eq!(manager.sessions().len(), 3);
    assert!(!manager.sessions().contains("s0"));
    assert!(manager.sessions().contains("s3"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn progress_checkpoints_are_visible_and_monotonic() {
    let (manager, _engine) = scripted_manager(
        EngineBehavior::Succeed,
        Duration::from_millis(400),
        SchedulerConfig::default(),
    );
    manager.start_simulation("s1", "75056", 10.0, None);

    let mut observed = Vec::new();
    let deadline = tokio::time::Instant::now() + SETTLE;
    loop {
        let status = manager.get_status("s1");
        observed.push((status.progress, status.message.clone()));
        if status.status != SessionStatus::Loading {
            assert_eq!(status.status, SessionStatus::Ready);
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "still loading: {status:?}");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(
        observed
            .iter()
            .any(|(progress, message)| *progress == PROGRESS_RUNNING && message == MESSAGE_RUNNING),
        "never saw the running checkpoint: {observed:?}"
    );
    assert!(
        observed.windows(2).all(|pair| pair[0].0 <= pair[1].0),
        "progress went backwards: {observed:?}"
    );
    assert_eq!(
        observed.last(),
        Some(&(PROGRESS_DONE, MESSAGE_DONE.to_string()))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn restarted_session_ignores_its_evicted_run() {
    let config = SchedulerConfig::default().with_max_sessions(1);
    let (manager, engine) =
        scripted_manager(EngineBehavior::Succeed, Duration::from_millis(400), config);

    let first = manager.start_simulation("s1", "75056", 10.0, None).expect("spawned");
    tokio::time::sleep(Duration::from_millis(50)).await;
    let other = manager.start_simulation("s2", "75056", 10.0, None).expect("spawned");
    assert!(!manager.sessions().contains("s1"));
    let restarted = manager
        .start_simulation("s1", "75056", 10.0, None)
        .expect("recreated session starts a new run");

    first.await.expect("task");
    let status = manager.get_status("s1");
    assert_eq!(status.status, SessionStatus::Loading);
    assert_eq!(status.progress, PROGRESS_QUEUED);
    assert_eq!(status.message, MESSAGE_QUEUED);
    assert!(manager.get_data("s1").is_none());

    other.await.expect("task");
    restarted.await.expect("task");
    let status = manager.get_status("s1");
    assert_eq!(status.status, SessionStatus::Ready);
    assert_eq!(status.progress, PROGRESS_DONE);
    assert!(manager.get_data("s1").is_some());
    assert_eq!(engine.calls(), 3);
}
