//! Terminal rendering for translations, history records, and the model catalog.

use chrono::{DateTime, Local, Utc};
use jplaw_ai::Translation;
use jplaw_core::{AVAILABLE_MODELS, ParseStrategy, ParsedOutput};
use jplaw_store::TranslationRecord;

/// Width of the id column in history listings.
const ID_WIDTH: usize = 36;

/// Preview characters shown per row in the history table.
const ROW_PREVIEW_CHARS: usize = 40;

// ── Public API ──

/// Print a fresh translation: both sections, then provenance.
pub fn print_translation(t: &Translation) {
    if t.simulated {
        println!("(simulated: no API key configured)");
        println!();
    }
    print_sections(&t.output);
    println!("  {:<26} {}", "model", t.model);
    println!("  {:<26} {}", "parse strategy", t.strategy.as_str());
}

/// Print the sections recovered from a raw completion.
pub fn print_parsed(output: &ParsedOutput, strategy: ParseStrategy) {
    print_sections(output);
    println!("  {:<26} {}", "parse strategy", strategy.as_str());
}

/// Print the history as one row per record, newest first.
pub fn print_history_table(records: &[TranslationRecord]) {
    if records.is_empty() {
        println!("History is empty.");
        return;
    }
    println!(
        "{:<ID_WIDTH$}  {:<16}  {:<22}  preview",
        "id", "saved", "model"
    );
    for record in records {
        println!("{}", history_row(record));
    }
    println!();
    println!("{} record(s)", records.len());
}

/// Print a single record as a vertical card.
pub fn print_record_card(record: &TranslationRecord) {
    println!("=== {} ===", record.id());
    println!("  {:<26} {}", "saved", format_time(record.timestamp()));
    println!("  {:<26} {}", "model", record.model());
    println!("  {:<26} {}", "preview", record.preview());
    println!();

    println!("Original");
    print_indented(record.original_text());
    println!();
    println!("Translation");
    print_indented(record.translation());
    println!();
    println!("Interpretation");
    print_indented(record.interpretation());
}

/// Print the selectable models with their providers.
pub fn print_models(current: &str) {
    for model in AVAILABLE_MODELS {
        let marker = if model.id == current { "*" } else { " " };
        println!(
            "{marker} {:<24} {:<8} {}",
            model.id,
            model.provider().as_str(),
            model.name
        );
    }
}

// ── Rendering helpers ──

fn print_sections(output: &ParsedOutput) {
    println!("Translation");
    print_indented_or_placeholder(&output.translation);
    println!();
    println!("Interpretation");
    print_indented_or_placeholder(&output.interpretation);
    println!();
}

fn print_indented_or_placeholder(text: &str) {
    if text.trim().is_empty() {
        println!("  (empty)");
    } else {
        print_indented(text);
    }
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("  {line}");
    }
}

fn history_row(record: &TranslationRecord) -> String {
    format!(
        "{:<ID_WIDTH$}  {:<16}  {:<22}  {}",
        record.id(),
        format_time(record.timestamp()),
        record.model(),
        one_line(record.preview(), ROW_PREVIEW_CHARS),
    )
}

/// Local time as `YYYY/MM/DD HH:MM`, or the raw value if out of range.
fn format_time(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(&Local).format("%Y/%m/%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

/// Collapse whitespace runs (including newlines) and cap at `max_chars`.
fn one_line(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &flat[..cut]),
        None => flat,
    }
}
