//! Capacity-bounded translation history over a key-value surface.
//!
//! The whole history lives under one storage key as a JSON array. Every
//! mutation is a read-modify-write of that array, so two processes saving at
//! the same moment can lose one record (last writer wins).
//!
//! No operation here returns an error. Storage faults are logged and each
//! operation degrades to a safe default: reads see an empty history, writes
//! become no-ops.

use std::sync::Arc;

use jplaw_core::HistoryConfig;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::kv::KeyValueStore;
use crate::record::TranslationRecord;
use crate::StoreError;

/// Translation history persisted through a [`KeyValueStore`].
pub struct HistoryStore<K> {
    kv: K,
    config: HistoryConfig,
    clock: Arc<dyn Clock>,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// History with the default policy (20 records, 100-character previews).
    pub fn new(kv: K) -> Self {
        Self::with_config(kv, HistoryConfig::default())
    }

    pub fn with_config(kv: K, config: HistoryConfig) -> Self {
        Self {
            kv,
            config: config.normalized(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Access the underlying key-value surface.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    // ── Operations ──

    /// Record a completed translation as the newest history entry.
    ///
    /// Evicts the oldest entries beyond capacity. Returns the stored record,
    /// or `None` if it could not be written.
    pub fn save(
        &self,
        original_text: &str,
        translation: &str,
        interpretation: &str,
        model: &str,
    ) -> Option<TranslationRecord> {
        let mut records = self.list();
        let id = fresh_id(&records);
        let record = TranslationRecord::new(
            id,
            self.clock.now_ms(),
            model,
            original_text,
            translation,
            interpretation,
            self.config.preview_chars,
        );

        records.insert(0, record.clone());
        let evicted = records.len().saturating_sub(self.config.capacity);
        records.truncate(self.config.capacity);

        match self.write(&records) {
            Ok(()) => {
                info!(
                    id = %record.id(),
                    model = %record.model(),
                    count = records.len(),
                    evicted,
                    "saved translation to history"
                );
                Some(record)
            }
            Err(e) => {
                error!(key = %self.config.storage_key, error = %e, "failed to save translation history");
                None
            }
        }
    }

    /// All records, newest first. Empty if nothing is stored or the stored
    /// value cannot be read.
    pub fn list(&self) -> Vec<TranslationRecord> {
        let mut records = match self.read() {
            Ok(records) => records,
            Err(e) => {
                error!(key = %self.config.storage_key, error = %e, "failed to load translation history");
                Vec::new()
            }
        };
        // Stable sort: equal timestamps keep their stored order.
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        records
    }

    /// Look up a single record by exact id.
    pub fn get(&self, id: &str) -> Option<TranslationRecord> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    /// Remove the record with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) {
        let mut records = self.list();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            debug!(id, "delete: no such history record");
            return;
        }

        match self.write(&records) {
            Ok(()) => info!(id, remaining = records.len(), "deleted history record"),
            Err(e) => {
                error!(key = %self.config.storage_key, id, error = %e, "failed to delete translation from history")
            }
        }
    }

    /// Drop the entire history.
    pub fn clear(&self) {
        match self.kv.remove(&self.config.storage_key) {
            Ok(()) => info!("cleared translation history"),
            Err(e) => {
                error!(key = %self.config.storage_key, error = %e, "failed to clear translation history")
            }
        }
    }

    // ── Storage ──

    fn read(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        let Some(raw) = self.kv.get(&self.config.storage_key)? else {
            return Ok(Vec::new());
        };
        let values: Vec<Value> = serde_json::from_str(&raw)?;
        Ok(values.into_iter().filter_map(decode_record).collect())
    }

    fn write(&self, records: &[TranslationRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.kv.set(&self.config.storage_key, &json)
    }
}

/// Decode one stored entry, skipping (and logging) entries that don't fit
/// the record layout instead of discarding the whole history.
fn decode_record(value: Value) -> Option<TranslationRecord> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "skipping malformed history record");
            None
        }
    }
}

fn fresh_id(existing: &[TranslationRecord]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
