//! Core types, LLM output parsing, and shared configuration for jplaw.

pub mod config;
mod error;
pub mod model;
pub mod output;
pub mod source;

pub use config::HistoryConfig;
pub use error::CoreError;
pub use model::{AVAILABLE_MODELS, DEFAULT_MODEL, ModelInfo, Provider};
pub use output::{ParseStrategy, ParsedOutput, parse_output, parse_output_with_strategy};
pub use source::{MAX_SOURCE_CHARS, validate_source};
