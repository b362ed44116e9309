mod common;

use common::{records, setup, snapshot_at, ScriptedGenerator};
use std::sync::Arc;

#[tokio::test]
async fn test_snapshot_at_five_is_stale_at_six() {
    let (_coordinator, cache) = setup(Arc::new(ScriptedGenerator::new()));
    cache.save(&snapshot_at(5)).await.unwrap();

    assert!(cache.is_stale(6).await);
    assert!(!cache.is_stale(5).await);
}

#[tokio::test]
async fn test_never_stale_below_three_records() {
    let (_coordinator, cache) = setup(Arc::new(ScriptedGenerator::new()));
    for count in 0..3 {
        assert!(!cache.is_stale(count).await);
    }

    cache.save(&snapshot_at(0)).await.unwrap();
    for count in 0..3 {
        assert!(!cache.is_stale(count).await);
    }
}

#[tokio::test]
async fn test_growing_journal_regenerates_once_per_new_record() {
    let generator = Arc::new(ScriptedGenerator::new());
    let (coordinator, cache) = setup(generator.clone());

    for n in 0..3 {
        assert_eq!(coordinator.get_or_refresh(&records(n)).await.unwrap(), None);
    }
    assert_eq!(generator.calls(), 0);

    let mut last_count = 0;
    for n in 3..7 {
        let snapshot = coordinator.get_or_refresh(&records(n)).await.unwrap().unwrap();
        assert!(snapshot.dream_count_at_generation >= last_count);
        last_count = snapshot.dream_count_at_generation;
        // a second read at the same size is served from cache
        coordinator.get_or_refresh(&records(n)).await.unwrap();
        assert!(!cache.is_stale(n).await);
    }
    assert_eq!(generator.calls(), 4);
}
