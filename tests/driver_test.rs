use rankwalk::graph::preset;
use rankwalk::{AutoAdvance, RankConfig, RankSession, RunState, Speed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

fn shared(name: &str, config: RankConfig) -> Arc<Mutex<RankSession>> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let graph = preset::by_name(name).unwrap().graph;
    Arc::new(Mutex::new(RankSession::with_graph(graph, config).unwrap()))
}

#[tokio::test]
async fn test_auto_advance_runs_until_converged() {
    let session = shared("simple-cycle", RankConfig::default().with_speed(Speed::Fast));
    assert!(session.lock().await.start());

    let (driver, mut updates) = AutoAdvance::spawn(Arc::clone(&session));
    timeout(Duration::from_secs(5), driver.join()).await.unwrap();

    let record = updates.recv().await.unwrap();
    assert_eq!(record.iteration, 1);
    assert!(record.converged);
    assert!(updates.recv().await.is_none());
    assert_eq!(session.lock().await.state(), RunState::Converged);
}

#[tokio::test]
async fn test_auto_advance_stops_at_cap() {
    let config = RankConfig::default()
        .with_speed(Speed::Fast)
        .with_max_iterations(3)
        .with_epsilon(1e-15);
    let session = shared("paper-example", config);
    session.lock().await.start();

    let (driver, mut updates) = AutoAdvance::spawn(Arc::clone(&session));
    timeout(Duration::from_secs(5), driver.join()).await.unwrap();

    let mut iterations = Vec::new();
    while let Some(record) = updates.recv().await {
        iterations.push(record.iteration);
    }
    assert_eq!(iterations, vec![1, 2, 3]);
    assert_eq!(session.lock().await.state(), RunState::Exhausted);
}

#[tokio::test]
async fn test_cancel_pauses_between_iterations() {
    let session = shared("paper-example", RankConfig::default().with_speed(Speed::Slow));
    session.lock().await.start();

    let (driver, _updates) = AutoAdvance::spawn(Arc::clone(&session));
    timeout(Duration::from_secs(5), driver.stop()).await.unwrap();

    let guard = session.lock().await;
    assert_eq!(guard.state(), RunState::Stepping);
    assert_eq!(guard.iteration(), 0);
}

#[tokio::test]
async fn test_pause_from_embedding_ends_the_task() {
    let session = shared("paper-example", RankConfig::default().with_speed(Speed::Fast));
    session.lock().await.start();

    let (driver, _updates) = AutoAdvance::spawn(Arc::clone(&session));
    session.lock().await.pause();
    timeout(Duration::from_secs(5), driver.join()).await.unwrap();

    let mut guard = session.lock().await;
    let iteration = guard.iteration();
    assert_eq!(guard.state(), RunState::Stepping);
    // Manual stepping continues from where the timer left off
    assert_eq!(guard.step().unwrap().iteration, iteration + 1);
}

#[tokio::test]
async fn test_busy_session_skips_ticks() {
    let session = shared("paper-example", RankConfig::default().with_speed(Speed::Fast));
    session.lock().await.start();

    let (driver, _updates) = AutoAdvance::spawn(Arc::clone(&session));
    {
        // Hold the session across several periods; those firings are dropped
        let guard = session.lock().await;
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(guard.iteration(), 0);
    }
    tokio::time::sleep(Duration::from_millis(250)).await;
    driver.stop().await;

    let iteration = session.lock().await.iteration();
    assert!(iteration >= 1 && iteration <= 3, "iteration {}", iteration);
}
