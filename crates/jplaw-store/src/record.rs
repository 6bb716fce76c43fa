//! The persisted history entry.

use serde::{Deserialize, Serialize};

/// Marker appended to truncated previews.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// One completed translation, as stored in history.
///
/// Records are only created by [`HistoryStore::save`](crate::HistoryStore::save)
/// and never modified afterwards, so fields are read through accessors.
/// Field names on disk are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    id: String,
    /// Creation time in epoch milliseconds. Sole sort key.
    timestamp: i64,
    model: String,
    original_text: String,
    translation: String,
    interpretation: String,
    /// Snapshot of the source text taken at creation time.
    preview: String,
}

impl TranslationRecord {
    pub(crate) fn new(
        id: String,
        timestamp: i64,
        model: &str,
        original_text: &str,
        translation: &str,
        interpretation: &str,
        preview_chars: usize,
    ) -> Self {
        Self {
            id,
            timestamp,
            model: model.to_string(),
            original_text: original_text.to_string(),
            translation: translation.to_string(),
            interpretation: interpretation.to_string(),
            preview: make_preview(original_text, preview_chars),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// First `max_chars` characters of `text`, with [`PREVIEW_ELLIPSIS`] appended
/// when anything was cut.
///
/// Counts Unicode scalar values, so Japanese text is never split mid-character.
pub fn make_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(original: &str) -> TranslationRecord {
        TranslationRecord::new(
            "id-1".into(),
            1_700_000_000_000,
            "gemini-2.5-pro",
            original,
            "译文",
            "解读",
            100,
        )
    }

    #[test]
    fn short_text_preview_is_verbatim() {
        assert_eq!(make_preview("第一条", 100), "第一条");
        assert_eq!(make_preview("", 100), "");
    }

    #[test]
    fn exact_length_is_not_truncated() {
        let text = "あ".repeat(100);
        assert_eq!(make_preview(&text, 100), text);
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let text = "契".repeat(101);
        let preview = make_preview(&text, 100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("契..."));
        assert_eq!(preview, format!("{}...", "契".repeat(100)));
    }

    #[test]
    fn zero_length_preview() {
        assert_eq!(make_preview("abc", 0), "...");
        assert_eq!(make_preview("", 0), "");
    }

    #[test]
    fn preview_is_captured_at_creation() {
        let r = record(&"条文".repeat(80));
        assert_eq!(r.preview().chars().count(), 103);
        assert_eq!(r.original_text().chars().count(), 160);
    }

    #[test]
    fn serialises_camel_case() {
        let r = record("原文");
        let json: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(json["id"], "id-1");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
        assert_eq!(json["originalText"], "原文");
        assert_eq!(json["preview"], "原文");
        assert!(json.get("original_text").is_none());
    }

    #[test]
    fn reads_legacy_layout() {
        let json = r#"{
            "id": "trans-1700000000000-k3j9x0a2b",
            "timestamp": 1700000000000,
            "model": "gpt-4-1106-preview",
            "originalText": "甲は乙に対し",
            "translation": "甲方对乙方",
            "interpretation": "* 甲/乙: 合同当事人",
            "preview": "甲は乙に対し"
        }"#;
        let r: TranslationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.id(), "trans-1700000000000-k3j9x0a2b");
        assert_eq!(r.timestamp(), 1_700_000_000_000);
        assert_eq!(r.model(), "gpt-4-1106-preview");
        assert_eq!(r.translation(), "甲方对乙方");
        assert_eq!(r.interpretation(), "* 甲/乙: 合同当事人");
    }
}
