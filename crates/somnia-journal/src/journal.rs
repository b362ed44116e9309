//! Journal facade over the stored record collection

use crate::store::{JournalError, KeyValueStore};
use crate::types::DreamRecord;
use serde_json::Value;

/// Storage key for the record collection
pub const DREAMS_KEY: &str = "dreams";

/// Reads and appends dream records through a [`KeyValueStore`].
pub struct Journal<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> Journal<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load every record in stored order.
    ///
    /// Never fails: a missing key, a storage error or a corrupt collection
    /// yields an empty journal, and individual corrupt records are skipped.
    pub async fn load(&self) -> Vec<DreamRecord> {
        let bytes = match self.store.get(DREAMS_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read dream journal");
                return Vec::new();
            }
        };

        decode_records(&bytes)
    }

    /// Append a record to the end of the collection.
    ///
    /// Unlike [`Journal::load`] this reads strictly: a storage error or a
    /// collection that is not a JSON array fails the append and leaves the
    /// stored value untouched. Entries that do not decode as records are
    /// written back as they were. Returns the number of stored entries.
    pub async fn append(&self, record: DreamRecord) -> Result<usize, JournalError> {
        let mut entries = self.load_raw().await?;
        entries.push(serde_json::to_value(&record)?);
        let json = serde_json::to_vec(&entries)?;
        self.store.set(DREAMS_KEY, &json).await?;
        Ok(entries.len())
    }

    async fn load_raw(&self) -> Result<Vec<Value>, JournalError> {
        match self.store.get(DREAMS_KEY).await? {
            None => Ok(Vec::new()),
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| JournalError::Malformed {
                    key: DREAMS_KEY.to_string(),
                    source,
                })
            }
        }
    }
}

fn decode_records(bytes: &[u8]) -> Vec<DreamRecord> {
    let raw: Vec<Value> = match serde_json::from_slice(bytes) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "dream journal is not a JSON array, ignoring");
            return Vec::new();
        }
    };

    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping corrupt dream record");
                None
            }
        })
        .collect()
}
