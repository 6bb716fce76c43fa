//! LLM integration: Gemini and OpenAI clients, prompt templates, and the
//! translate-then-parse pipeline.

mod error;
pub mod gemini;
mod http;
pub mod mock;
pub mod openai;
pub mod prompt;
mod translator;

pub use error::TranslateError;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use translator::{ConnectionStatus, Endpoints, Translation, Translator};
