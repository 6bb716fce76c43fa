//! Markdown rendering of a single history record for file export.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::record::TranslationRecord;

/// Display format for the generation time (`2024/01/05 14:30`).
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Render `record` as a markdown report, with the time in the local zone.
pub fn to_document(record: &TranslationRecord) -> String {
    render_document(record, &Local)
}

/// Render `record` as a markdown report, with the time shown in `tz`.
pub fn render_document<Tz>(record: &TranslationRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let date = format_timestamp(record.timestamp(), tz);
    format!(
        "# 翻译报告\n\
         \n\
         **生成时间**: {date}  \n\
         **使用模型**: {model}\n\
         \n\
         ---\n\
         \n\
         ## 原文 (Original Text)\n\
         \n\
         {original}\n\
         \n\
         ---\n\
         \n\
         ## 译文 (Translation)\n\
         \n\
         {translation}\n\
         \n\
         ---\n\
         \n\
         ## 专业解读 (Professional Interpretation)\n\
         \n\
         {interpretation}\n\
         \n\
         ---\n\
         \n\
         *此文档由 JP Legal Translator 自动生成*\n",
        model = record.model(),
        original = record.original_text(),
        translation = record.translation(),
        interpretation = record.interpretation(),
    )
}

/// Suggested file name for an exported record.
pub fn document_file_name(record: &TranslationRecord) -> String {
    format!("translation-{}.md", record.timestamp())
}

fn format_timestamp<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
        // Out of chrono's range; show the raw value rather than fail.
        None => millis.to_string(),
    }
}
