//! History retention policy.

use serde::Deserialize;
use tracing::warn;

/// Number of translations kept before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Characters of source text kept in a record's preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Storage key under which the history list is persisted.
pub const DEFAULT_HISTORY_KEY: &str = "jp_translator_history";

/// Retention and layout settings for the translation history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub preview_chars: usize,
    pub storage_key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            storage_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

impl HistoryConfig {
    /// Clamp settings that would make the store unusable.
    ///
    /// A zero capacity would drop every record on save, so it becomes 1.
    pub fn normalized(mut self) -> Self {
        if self.capacity == 0 {
            warn!("history capacity of 0 clamped to 1");
            self.capacity = 1;
        }
        if self.storage_key.trim().is_empty() {
            warn!(default = DEFAULT_HISTORY_KEY, "blank history storage key replaced");
            self.storage_key = DEFAULT_HISTORY_KEY.to_string();
        }
        self
    }
}
