mod common;

use common::{records, setup, snapshot_at, ScriptedGenerator};
use somnia_insight::InsightError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

#[tokio::test]
async fn test_concurrent_reads_share_one_generation() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, _cache) = setup(generator.clone());
    let recs = records(4);

    let (a, b) = tokio::join!(
        coordinator.get_or_refresh(&recs),
        coordinator.get_or_refresh(&recs)
    );

    let a = a.unwrap().unwrap();
    let b = b.unwrap().unwrap();
    assert_eq!(generator.calls(), 1);
    assert_eq!(a, b);
    assert_eq!(a.dream_count_at_generation, 4);
}

#[tokio::test]
async fn test_stale_read_and_forced_refresh_in_same_tick() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, _cache) = setup(generator.clone());
    let recs = records(5);

    let (read, forced) = tokio::join!(
        coordinator.get_or_refresh(&recs),
        coordinator.force_refresh(&recs)
    );

    assert_eq!(generator.calls(), 1);
    assert_eq!(read.unwrap().unwrap(), forced.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_tasks_one_generation() {
    let gate = Arc::new(Semaphore::new(0));
    let generator = Arc::new(ScriptedGenerator::new().gated(gate.clone()));
    let (coordinator, _cache) = setup(generator.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            let recs = records(6);
            if i % 2 == 0 {
                coordinator.force_refresh(&recs).await
            } else {
                coordinator
                    .get_or_refresh(&recs)
                    .await
                    .map(|s| s.expect("stale cache must refresh"))
            }
        }));
    }

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(coordinator.is_refreshing());
    gate.add_permits(1);

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(generator.calls(), 1);
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!(!coordinator.is_refreshing());
}

#[tokio::test]
async fn test_force_refresh_ignores_freshness() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, cache) = setup(generator.clone());
    cache.save(&snapshot_at(5)).await.unwrap();
    let recs = records(5);

    assert!(!cache.is_stale(5).await);
    let snapshot = coordinator.force_refresh(&recs).await.unwrap();
    assert_eq!(generator.calls(), 1);
    assert!(snapshot.main_insight.starts_with("call 1"));
    assert_eq!(cache.load().await, Some(snapshot));
}

#[tokio::test]
async fn test_force_refresh_below_floor() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, _cache) = setup(generator.clone());

    let snapshot = coordinator.force_refresh(&records(1)).await.unwrap();
    assert_eq!(snapshot.dream_count_at_generation, 1);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_fresh_cache_skips_generator() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, cache) = setup(generator.clone());
    let seeded = snapshot_at(5);
    cache.save(&seeded).await.unwrap();

    let served = coordinator.get_or_refresh(&records(5)).await.unwrap();
    assert_eq!(served, Some(seeded));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_failure_reaches_every_caller_and_keeps_snapshot() {
    let generator = Arc::new(ScriptedGenerator::new().then(Err(InsightError::Status {
        status: 503,
        body: "overloaded".to_string(),
    })));
    let (coordinator, cache) = setup(generator.clone());
    let seeded = snapshot_at(3);
    cache.save(&seeded).await.unwrap();
    let recs = records(4);

    let (a, b) = tokio::join!(
        coordinator.get_or_refresh(&recs),
        coordinator.force_refresh(&recs)
    );

    let expected = InsightError::Status {
        status: 503,
        body: "overloaded".to_string(),
    };
    assert_eq!(a.unwrap_err(), expected);
    assert_eq!(b.unwrap_err(), expected);
    assert_eq!(generator.calls(), 1);
    assert!(!coordinator.is_refreshing());
    assert_eq!(coordinator.cached().await, Some(seeded));

    // next read retries and succeeds
    let recovered = coordinator.get_or_refresh(&recs).await.unwrap().unwrap();
    assert_eq!(recovered.dream_count_at_generation, 4);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_missing_credentials_not_retryable() {
    let generator = Arc::new(ScriptedGenerator::new().then(Err(InsightError::MissingCredentials)));
    let (coordinator, _cache) = setup(generator.clone());

    let err = coordinator.force_refresh(&records(3)).await.unwrap_err();
    assert_eq!(err, InsightError::MissingCredentials);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_abandoned_refresh_still_persists() {
    let generator = Arc::new(ScriptedGenerator::new().with_delay(Duration::from_millis(80)));
    let (coordinator, cache) = setup(generator.clone());
    let recs = records(3);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), coordinator.force_refresh(&recs)).await;
    assert!(abandoned.is_err());
    assert!(coordinator.is_refreshing());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!coordinator.is_refreshing());
    let persisted = cache.load().await.unwrap();
    assert_eq!(persisted.dream_count_at_generation, 3);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_joiner_after_abandonment_gets_same_result() {
    let generator = Arc::new(ScriptedGenerator::new().with_delay(Duration::from_millis(60)));
    let (coordinator, _cache) = setup(generator.clone());
    let recs = records(3);

    let _ = tokio::time::timeout(Duration::from_millis(10), coordinator.force_refresh(&recs)).await;
    let joined = coordinator.force_refresh(&recs).await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert!(joined.main_insight.starts_with("call 1"));
}

#[tokio::test]
async fn test_snapshot_count_never_regresses() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, cache) = setup(generator.clone());
    cache.save(&snapshot_at(10)).await.unwrap();

    let err = coordinator.force_refresh(&records(4)).await.unwrap_err();
    assert_eq!(
        err,
        InsightError::CountRegression {
            persisted: 10,
            attempted: 4
        }
    );
    assert_eq!(cache.load().await.unwrap().dream_count_at_generation, 10);
}
