//! Translation history: a capacity-bounded list of completed translations
//! persisted through a key-value surface, plus markdown export.

mod clock;
mod error;
pub mod export;
mod history;
pub mod kv;
mod record;

pub use clock::{Clock, SystemClock};
pub use error::StoreError;
pub use export::{document_file_name, render_document, to_document};
pub use history::HistoryStore;
pub use kv::{FileKv, KeyValueStore, MemoryKv};
pub use record::{TranslationRecord, make_preview};
