#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use somnia_insight::{
    GeneratedInsight, InsightCache, InsightError, InsightGenerator, InsightRequest,
    InsightSnapshot, RefreshCoordinator, StalenessPolicy,
};
use somnia_journal::{DreamRecord, Emotion, MemoryStore, Symbol};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Generator that replays scripted outcomes and counts its calls
pub struct ScriptedGenerator {
    calls: AtomicUsize,
    outcomes: Mutex<VecDeque<Result<(), InsightError>>>,
    delay: Duration,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcomes: Mutex::new(VecDeque::new()),
            delay: Duration::from_millis(20),
            gate: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Block every call until the test adds a permit
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue outcomes for successive calls; unscripted calls succeed
    pub fn then(self, outcome: Result<(), InsightError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightGenerator for ScriptedGenerator {
    async fn generate(&self, request: &InsightRequest) -> Result<GeneratedInsight, InsightError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        tokio::time::sleep(self.delay).await;

        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome.map(|()| GeneratedInsight {
            main_insight: format!("call {} saw {} dreams", call, request.record_count),
            pattern: "recurring water".to_string(),
            ..Default::default()
        })
    }
}

pub fn records(n: usize) -> Vec<DreamRecord> {
    (0..n)
        .map(|i| {
            DreamRecord::new(format!("dream {i}"))
                .with_symbol(Symbol::new("water"))
                .with_emotion(Emotion::new("joy", 7))
        })
        .collect()
}

pub fn snapshot_at(count: usize) -> InsightSnapshot {
    InsightSnapshot::stamp(
        GeneratedInsight {
            main_insight: format!("seeded at {count}"),
            ..Default::default()
        },
        count,
        Utc::now(),
    )
}

pub fn setup(generator: Arc<ScriptedGenerator>) -> (RefreshCoordinator, InsightCache) {
    let cache = InsightCache::new(Arc::new(MemoryStore::new()), StalenessPolicy::default());
    let coordinator = RefreshCoordinator::new(cache.clone(), generator);
    (coordinator, cache)
}
