//! Extraction of the translation and interpretation sections from a raw
//! LLM completion.
//!
//! Models are asked to wrap each section in explicit markers, but they do not
//! always comply. Parsing is therefore tiered:
//!
//! 1. **Delimited**: `---TRANSLATION_START---` … `---TRANSLATION_END---` and
//!    `---INTERPRETATION_START---` … `---INTERPRETATION_END---`, searched
//!    independently anywhere in the text.
//! 2. **Header split**: used only when both delimited sections come back
//!    empty. Splits on the first `## 专业解读` / `## Interpretation` heading.
//! 3. **Passthrough**: the whole completion becomes the translation.
//!
//! Parsing never fails and has no side effects.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const TRANSLATION_START: &str = "---TRANSLATION_START---";
pub const TRANSLATION_END: &str = "---TRANSLATION_END---";
pub const INTERPRETATION_START: &str = "---INTERPRETATION_START---";
pub const INTERPRETATION_END: &str = "---INTERPRETATION_END---";

static TRANSLATION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)---TRANSLATION_START---(.*?)---TRANSLATION_END---")
        .expect("translation block pattern is valid")
});

static INTERPRETATION_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)---INTERPRETATION_START---(.*?)---INTERPRETATION_END---")
        .expect("interpretation block pattern is valid")
});

static INTERPRETATION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)##\s*专业解读|##\s*Interpretation")
        .expect("interpretation header pattern is valid")
});

/// The two logical sections of a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    pub translation: String,
    pub interpretation: String,
}

impl ParsedOutput {
    /// Both sections are present. Only complete outputs go into history.
    pub fn is_complete(&self) -> bool {
        !self.translation.is_empty() && !self.interpretation.is_empty()
    }
}

/// Which tier produced a [`ParsedOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// At least one marker pair was found.
    Delimited,
    /// No marker pair; split on an interpretation heading.
    HeaderSplit,
    /// Nothing recognisable; the raw text is the translation.
    Passthrough,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delimited => "delimited",
            Self::HeaderSplit => "header-split",
            Self::Passthrough => "passthrough",
        }
    }
}

/// Parse a raw completion into its translation and interpretation.
pub fn parse_output(raw: &str) -> ParsedOutput {
    parse_output_with_strategy(raw).0
}

/// Parse a raw completion and report which tier matched.
pub fn parse_output_with_strategy(raw: &str) -> (ParsedOutput, ParseStrategy) {
    let translation = capture_trimmed(&TRANSLATION_BLOCK, raw);
    let interpretation = capture_trimmed(&INTERPRETATION_BLOCK, raw);

    if !translation.is_empty() || !interpretation.is_empty() {
        let output = ParsedOutput {
            translation,
            interpretation,
        };
        return (output, ParseStrategy::Delimited);
    }

    if let Some(header) = INTERPRETATION_HEADER.find(raw) {
        let before = &raw[..header.start()];
        let after = &raw[header.end()..];
        let output = ParsedOutput {
            translation: before.replace(TRANSLATION_START, "").trim().to_string(),
            interpretation: after.replace(INTERPRETATION_END, "").trim().to_string(),
        };
        return (output, ParseStrategy::HeaderSplit);
    }

    let output = ParsedOutput {
        translation: raw.to_string(),
        interpretation: String::new(),
    };
    (output, ParseStrategy::Passthrough)
}

fn capture_trimmed(pattern: &Regex, raw: &str) -> String {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(translation: &str, interpretation: &str) -> ParsedOutput {
        ParsedOutput {
            translation: translation.into(),
            interpretation: interpretation.into(),
        }
    }

    #[test]
    fn both_marker_pairs_surrounded_by_noise() {
        let raw = "noise ---TRANSLATION_START--- 你好 ---TRANSLATION_END--- noise \
                   ---INTERPRETATION_START--- 术语 ---INTERPRETATION_END--- noise";
        let (out, strategy) = parse_output_with_strategy(raw);
        assert_eq!(out, parsed("你好", "术语"));
        assert_eq!(strategy, ParseStrategy::Delimited);
    }

    #[test]
    fn multi_line_sections() {
        let raw = "---TRANSLATION_START---\n第一条\n\n第二条\n---TRANSLATION_END---\n\n\
                   ---INTERPRETATION_START---\n* **別途定める**: 另行规定\n* **鑑み**: 鉴于\n\
                   ---INTERPRETATION_END---\n";
        let out = parse_output(raw);
        assert_eq!(out.translation, "第一条\n\n第二条");
        assert_eq!(out.interpretation, "* **別途定める**: 另行规定\n* **鑑み**: 鉴于");
    }

    #[test]
    fn only_translation_pair() {
        let raw = "---TRANSLATION_START--- 本合同 ---TRANSLATION_END--- trailing";
        let (out, strategy) = parse_output_with_strategy(raw);
        assert_eq!(out, parsed("本合同", ""));
        assert_eq!(strategy, ParseStrategy::Delimited);
        assert!(!out.is_complete());
    }

    #[test]
    fn only_interpretation_pair_skips_fallback() {
        // A heading is present, but a delimited section already matched.
        let raw = "text\n## Interpretation\nignored\n\
                   ---INTERPRETATION_START--- 解读 ---INTERPRETATION_END---";
        let (out, strategy) = parse_output_with_strategy(raw);
        assert_eq!(out, parsed("", "解读"));
        assert_eq!(strategy, ParseStrategy::Delimited);
    }

    #[test]
    fn first_pair_wins_when_repeated() {
        let raw = "---TRANSLATION_START---a---TRANSLATION_END---\
                   ---TRANSLATION_START---b---TRANSLATION_END---";
        assert_eq!(parse_output(raw).translation, "a");
    }

    #[test]
    fn plain_text_passes_through() {
        let (out, strategy) = parse_output_with_strategy("plain text only");
        assert_eq!(out, parsed("plain text only", ""));
        assert_eq!(strategy, ParseStrategy::Passthrough);
    }

    #[test]
    fn passthrough_keeps_raw_text_untrimmed() {
        let out = parse_output("  spaced  \n");
        assert_eq!(out.translation, "  spaced  \n");
        assert_eq!(out.interpretation, "");
    }

    #[test]
    fn empty_input() {
        let (out, strategy) = parse_output_with_strategy("");
        assert_eq!(out, ParsedOutput::default());
        assert_eq!(strategy, ParseStrategy::Passthrough);
    }

    #[test]
    fn chinese_header_split() {
        let (out, strategy) = parse_output_with_strategy("intro text\n## 专业解读\nglossary text");
        assert_eq!(out, parsed("intro text", "glossary text"));
        assert_eq!(strategy, ParseStrategy::HeaderSplit);
    }

    #[test]
    fn english_header_is_case_insensitive() {
        let out = parse_output("译文\n##   INTERPRETATION\n- 术语");
        assert_eq!(out, parsed("译文", "- 术语"));
    }

    #[test]
    fn header_split_strips_stray_markers() {
        let raw = "---TRANSLATION_START---\n译文\n## 专业解读与术语辨析\n解读\n---INTERPRETATION_END---";
        let out = parse_output(raw);
        assert_eq!(out.translation, "译文");
        assert_eq!(out.interpretation, "与术语辨析\n解读");
    }

    #[test]
    fn header_split_uses_first_heading_only() {
        let raw = "A\n## Interpretation\nB\n## Interpretation\nC";
        let out = parse_output(raw);
        assert_eq!(out.translation, "A");
        assert_eq!(out.interpretation, "B\n## Interpretation\nC");
    }

    #[test]
    fn reversed_markers_fall_through() {
        let raw = "---TRANSLATION_END--- x ---TRANSLATION_START---";
        let (out, strategy) = parse_output_with_strategy(raw);
        assert_eq!(strategy, ParseStrategy::Passthrough);
        assert_eq!(out.translation, raw);
    }

    #[test]
    fn empty_marker_pairs_fall_back_to_header() {
        let raw = "---TRANSLATION_START---  ---TRANSLATION_END---\n正文\n## 专业解读\n说明";
        let (out, strategy) = parse_output_with_strategy(raw);
        assert_eq!(strategy, ParseStrategy::HeaderSplit);
        assert_eq!(out.translation, "---TRANSLATION_END---\n正文");
        assert_eq!(out.interpretation, "说明");
    }

    #[test]
    fn unterminated_marker_is_not_a_section() {
        let raw = "---TRANSLATION_START--- never closed";
        assert_eq!(parse_output(raw), parsed(raw, ""));
    }

    #[test]
    fn deterministic() {
        let inputs = [
            "",
            "plain",
            "a\n## 专业解读\nb",
            "---TRANSLATION_START---x---TRANSLATION_END---",
            "---INTERPRETATION_END------INTERPRETATION_START---",
        ];
        for input in inputs {
            assert_eq!(parse_output(input), parse_output(input));
        }
    }

    #[test]
    fn parsed_output_serialises_field_names() {
        let json = serde_json::to_string(&parsed("t", "i")).unwrap();
        assert_eq!(json, r#"{"translation":"t","interpretation":"i"}"#);
    }

    #[test]
    fn strategy_labels() {
        assert_eq!(ParseStrategy::Delimited.as_str(), "delimited");
        assert_eq!(ParseStrategy::HeaderSplit.as_str(), "header-split");
        assert_eq!(ParseStrategy::Passthrough.as_str(), "passthrough");
    }
}
