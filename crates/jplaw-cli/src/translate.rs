//! Translate pipeline: read source text, call the translator, record history.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use jplaw_ai::{Translation, Translator};
use jplaw_store::{HistoryStore, KeyValueStore, TranslationRecord, to_document};
use tracing::{info, warn};

pub struct TranslateOutcome {
    pub translation: Translation,
    /// The history entry, when the result was complete and saving succeeded.
    pub record: Option<TranslationRecord>,
    pub elapsed_secs: f64,
}

/// Read source text from `path`, or from stdin when absent.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Translate `text` and, when `history` is given, save a complete result.
///
/// Partial results (either section empty) are shown but never saved.
pub async fn run_translate<K: KeyValueStore>(
    translator: &Translator,
    history: Option<&HistoryStore<K>>,
    text: &str,
    model: &str,
) -> anyhow::Result<TranslateOutcome> {
    let start = Instant::now();

    let translation = translator
        .translate(text, model)
        .await
        .with_context(|| format!("translating with {model}"))?;

    let record = match history {
        Some(store) if translation.output.is_complete() => store.save(
            &translation.original_text,
            &translation.output.translation,
            &translation.output.interpretation,
            &translation.model,
        ),
        Some(_) => {
            warn!(model, "incomplete translation not saved to history");
            None
        }
        None => None,
    };

    let elapsed_secs = start.elapsed().as_secs_f64();
    info!(
        model,
        saved = record.is_some(),
        elapsed_secs,
        "translate finished"
    );

    Ok(TranslateOutcome {
        translation,
        record,
        elapsed_secs,
    })
}

/// Write the markdown document for `record` to `path`.
pub fn write_document(record: &TranslationRecord, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, to_document(record))
        .with_context(|| format!("writing {}", path.display()))?;
    info!(id = %record.id(), path = %path.display(), "document written");
    Ok(())
}
