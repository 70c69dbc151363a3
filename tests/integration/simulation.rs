//! End-to-end simulation runs with zero pauses and seeded randomness.

use std::sync::Arc;
use std::time::Duration;

use aumvion::analyst::playbook::{PlaybookAnalyst, ADVANCED_ATTACK_DEFENSE, NETWORK_ATTACK_DEFENSE};
use aumvion::catalog::{find_location, find_threat};
use aumvion::config::SimulationConfig;
use aumvion::engine::metrics::calculate_metrics;
use aumvion::engine::simulator::Simulator;
use aumvion::session::{Session, SessionState};

fn setup(seed: u64) -> (Arc<Session>, Simulator) {
    let config = SimulationConfig::instant();
    let session = Arc::new(Session::new(SessionState::from_config(&config)));
    let sim = Simulator::with_seed(
        session.clone(),
        Box::new(PlaybookAnalyst::new()),
        config,
        seed,
    );
    (session, sim)
}

#[test]
fn test_empty_session_metrics() {
    let session = Session::default();
    let snap = tokio_test::block_on(session.snapshot());
    let metrics = calculate_metrics(&snap.ledger);
    assert_eq!(metrics.resolved_count, 0);
    assert_eq!(metrics.mean_time_to_recovery_secs, 0.0);
}

#[tokio::test]
async fn test_n_manual_cycles() {
    let (session, mut sim) = setup(1234);

    for _ in 0..25 {
        session.launch_manual().await.unwrap();
        sim.run_pending().await;
    }

    let snap = session.snapshot().await;
    assert_eq!(snap.ledger.len(), 25);
    assert_eq!(snap.attack_counts.len(), 15);

    let counts: Vec<f64> = snap.attack_counts.iter().map(|p| p.count).collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    assert!((counts[14] - snap.current_attack_count).abs() < 1e-10);

    let metrics = snap.metrics();
    assert_eq!(metrics.resolved_count, 25);
    let expected: f64 =
        snap.ledger.iter().map(|e| e.healing_time_secs).sum::<f64>() / 25.0;
    assert!((metrics.mean_time_to_recovery_secs - expected).abs() < 1e-10);
}

#[tokio::test]
async fn test_ledger_entries_reference_catalogs() {
    let (session, mut sim) = setup(99);
    for _ in 0..12 {
        session.launch_manual().await.unwrap();
        sim.run_pending().await;
    }

    for entry in &session.snapshot().await.ledger {
        let threat = find_threat(&entry.threat).expect("threat from catalog");
        assert!(find_location(&entry.location).is_some());
        let category = threat.category.as_str();
        if category == "Advanced Attack" || category == "Network Attack" {
            assert!(
                entry.defense_strategy == ADVANCED_ATTACK_DEFENSE
                    || entry.defense_strategy == NETWORK_ATTACK_DEFENSE
            );
        } else {
            assert!(entry.defense_strategy.contains(category));
        }
        assert_eq!(entry.hash.len(), 11);
    }
}

#[tokio::test]
async fn test_background_simulator_auto_mode_and_stop() {
    let config = SimulationConfig {
        auto_restart_pause_ms: 5,
        ..SimulationConfig::instant()
    };
    let session = Arc::new(Session::new(SessionState::from_config(&config)));
    let sim = Simulator::with_seed(
        session.clone(),
        Box::new(PlaybookAnalyst::new()),
        config,
        77,
    );
    let handle = tokio::spawn(sim.run());

    session.set_auto_mode(true).await;
    wait_until(&session, |s| s.ledger.len() >= 3).await;

    session.set_auto_mode(false).await;
    wait_until(&session, |s| !s.cycle_running && !s.attack_in_progress).await;
    let settled = session.snapshot().await.ledger.len();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(session.snapshot().await.ledger.len(), settled);

    // A manual launch still works once auto mode is off.
    session.launch_manual().await.unwrap();
    wait_until(&session, |s| s.ledger.len() == settled + 1 && !s.attack_in_progress).await;

    handle.abort();
}

async fn wait_until(session: &Session, done: impl Fn(&SessionState) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if done(&*session.state.read().await) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
