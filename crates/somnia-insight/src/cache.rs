//! Persisted insight snapshot and the staleness rule

use crate::error::InsightError;
use crate::types::InsightSnapshot;
use serde::{Deserialize, Serialize};
use somnia_journal::KeyValueStore;
use std::sync::Arc;

/// Storage key for the snapshot
pub const SNAPSHOT_KEY: &str = "dream_insights";

/// When a snapshot should be regenerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessPolicy {
    /// Below this many records nothing is ever stale
    pub min_records: usize,
    /// New records since generation that make a snapshot stale
    pub min_new_records: usize,
}

impl StalenessPolicy {
    pub fn new() -> Self {
        Self {
            min_records: 3,
            min_new_records: 1,
        }
    }

    pub fn is_stale(&self, snapshot: Option<&InsightSnapshot>, current_record_count: usize) -> bool {
        if current_record_count < self.min_records {
            return false;
        }
        match snapshot {
            None => true,
            Some(s) => {
                current_record_count.saturating_sub(s.dream_count_at_generation)
                    >= self.min_new_records
            }
        }
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads and writes the snapshot through the key-value store
#[derive(Clone)]
pub struct InsightCache {
    store: Arc<dyn KeyValueStore>,
    policy: StalenessPolicy,
}

impl InsightCache {
    pub fn new(store: Arc<dyn KeyValueStore>, policy: StalenessPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    /// Current snapshot. Read and decode failures count as a miss.
    pub async fn load(&self) -> Option<InsightSnapshot> {
        let bytes = match self.store.get(SNAPSHOT_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read insight snapshot");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable insight snapshot");
                None
            }
        }
    }

    /// Replace the snapshot with a single write.
    ///
    /// Refuses a snapshot generated from fewer records than the persisted one.
    pub async fn save(&self, snapshot: &InsightSnapshot) -> Result<(), InsightError> {
        if let Some(current) = self.load().await {
            if snapshot.dream_count_at_generation < current.dream_count_at_generation {
                return Err(InsightError::CountRegression {
                    persisted: current.dream_count_at_generation,
                    attempted: snapshot.dream_count_at_generation,
                });
            }
        }

        let json = serde_json::to_vec(snapshot).map_err(|e| InsightError::Storage(e.to_string()))?;
        self.store.set(SNAPSHOT_KEY, &json).await?;
        Ok(())
    }

    pub async fn is_stale(&self, current_record_count: usize) -> bool {
        let snapshot = self.load().await;
        self.policy.is_stale(snapshot.as_ref(), current_record_count)
    }
}
