//! Canned completion used when no API key is configured.

use jplaw_core::output::{
    INTERPRETATION_END, INTERPRETATION_START, TRANSLATION_END, TRANSLATION_START,
};

/// A simulated completion in the same delimited format a real model is asked
/// to produce, labelled with `model` so it cannot be mistaken for real output.
pub fn mock_completion(model: &str) -> String {
    format!(
        "{TRANSLATION_START}\n\
         [{model} 模拟全文翻译]\n\
         \n\
         这是对原文本的模拟翻译结果。在真实模式下，这里将显示完整、流畅的简体中文公文体翻译，保留段落结构。\n\
         \n\
         例如：\n\
         本合同（以下简称“本合同”）由以下双方于...签署。\n\
         {TRANSLATION_END}\n\
         \n\
         {INTERPRETATION_START}\n\
         [{model} 模拟专业解读]\n\
         \n\
         * **模拟术语1**: 解释...\n\
         * **模拟术语2**: 解释...\n\
         {INTERPRETATION_END}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jplaw_core::{ParseStrategy, parse_output_with_strategy};

    #[test]
    fn mock_parses_as_complete_delimited_output() {
        let (out, strategy) = parse_output_with_strategy(&mock_completion("gemini-2.5-flash"));
        assert_eq!(strategy, ParseStrategy::Delimited);
        assert!(out.is_complete());
        assert!(out.translation.starts_with("[gemini-2.5-flash 模拟全文翻译]"));
        assert!(out.interpretation.starts_with("[gemini-2.5-flash 模拟专业解读]"));
    }
}
