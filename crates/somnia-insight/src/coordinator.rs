//! Single-flight insight regeneration

use crate::cache::InsightCache;
use crate::error::InsightError;
use crate::generator::{InsightGenerator, InsightRequest};
use crate::types::InsightSnapshot;
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use somnia_journal::DreamRecord;
use somnia_stats::StatsAggregate;
use std::sync::{Arc, Mutex};

type RefreshResult = Result<InsightSnapshot, InsightError>;
type InFlight = Shared<BoxFuture<'static, RefreshResult>>;

/// Serves insight snapshots, regenerating at most once at a time.
///
/// Requests arriving while a regeneration runs join it instead of starting
/// another. The regeneration runs on its own task, so it still persists
/// its result when every caller has stopped waiting.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    cache: InsightCache,
    generator: Arc<dyn InsightGenerator>,
    in_flight: Mutex<Option<InFlight>>,
}

/// Clears the in-flight slot when the regeneration task ends, even by panic
struct InFlightGuard(Arc<Inner>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut slot = self.0.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl RefreshCoordinator {
    pub fn new(cache: InsightCache, generator: Arc<dyn InsightGenerator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache,
                generator,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Persisted snapshot, without evaluating staleness
    pub async fn cached(&self) -> Option<InsightSnapshot> {
        self.inner.cache.load().await
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Cached snapshot when fresh, otherwise the result of a regeneration.
    ///
    /// `Ok(None)` means there is nothing to show yet (too few records).
    pub async fn get_or_refresh(
        &self,
        records: &[DreamRecord],
    ) -> Result<Option<InsightSnapshot>, InsightError> {
        let cached = self.inner.cache.load().await;
        let policy = self.inner.cache.policy();

        if !policy.is_stale(cached.as_ref(), records.len()) {
            tracing::debug!(
                records = records.len(),
                cached = cached.is_some(),
                "insight snapshot is fresh"
            );
            return Ok(cached);
        }

        self.refresh(records).await.map(Some)
    }

    /// Regenerate regardless of staleness, still joining any refresh in flight
    pub async fn force_refresh(&self, records: &[DreamRecord]) -> Result<InsightSnapshot, InsightError> {
        self.refresh(records).await
    }

    fn refresh(&self, records: &[DreamRecord]) -> InFlight {
        let mut slot = self.inner.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(running) = slot.as_ref() {
            tracing::debug!("joining insight refresh already in flight");
            return running.clone();
        }

        let request = InsightRequest {
            aggregate: StatsAggregate::compute(records),
            record_count: records.len(),
        };

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let guard = InFlightGuard(Arc::clone(&inner));
            let result = inner.regenerate(request).await;
            drop(guard);
            result
        });

        let shared = async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "insight refresh task failed");
                    Err(InsightError::Aborted)
                }
            }
        }
        .boxed()
        .shared();

        *slot = Some(shared.clone());
        shared
    }
}

impl Inner {
    async fn regenerate(&self, request: InsightRequest) -> Result<InsightSnapshot, InsightError> {
        let record_count = request.record_count;
        tracing::info!(records = record_count, "regenerating dream insights");

        let generated = match self.generator.generate(&request).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "insight generation failed");
                return Err(e);
            }
        };

        let snapshot = InsightSnapshot::stamp(generated, record_count, Utc::now());
        self.cache.save(&snapshot).await?;
        tracing::info!(records = record_count, "dream insights updated");
        Ok(snapshot)
    }
}
