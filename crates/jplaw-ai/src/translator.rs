//! Translation requests: validate, route to a provider, parse the reply.

use jplaw_core::{ParseStrategy, ParsedOutput, Provider, parse_output_with_strategy, validate_source};
use tracing::{info, warn};

use crate::TranslateError;
use crate::gemini::{GEMINI_BASE_URL, GeminiClient};
use crate::mock::mock_completion;
use crate::openai::{OPENAI_BASE_URL, OpenAiClient};
use crate::prompt::{SYSTEM_PROMPT, TEMPERATURE, build_combined_prompt, build_user_prompt};

/// Provider API roots. Override for proxies or local test servers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub gemini: String,
    pub openai: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gemini: GEMINI_BASE_URL.to_string(),
            openai: OPENAI_BASE_URL.to_string(),
        }
    }
}

/// A finished translation, ready to display or save.
#[derive(Debug, Clone)]
pub struct Translation {
    pub original_text: String,
    pub model: String,
    pub output: ParsedOutput,
    pub strategy: ParseStrategy,
    /// Produced offline without calling a provider.
    pub simulated: bool,
}

/// Result of a key check. Failures are reported here, never as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

impl ConnectionStatus {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Sends legal text to an LLM and splits the reply into sections.
pub struct Translator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoints: Endpoints,
}

impl Translator {
    /// A blank or absent key puts the translator in offline mock mode.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Translate `text` with `model`.
    ///
    /// Without an API key this returns a simulated translation instead of
    /// calling a provider.
    pub async fn translate(&self, text: &str, model: &str) -> Result<Translation, TranslateError> {
        let text = validate_source(text)?;
        let provider = Provider::for_model(model);

        let (raw, simulated) = match &self.api_key {
            None => {
                warn!(model, "no API key configured, returning mock translation");
                (mock_completion(model), true)
            }
            Some(key) => {
                info!(%provider, model, chars = text.chars().count(), "requesting translation");
                (self.complete(provider, key, model, text).await?, false)
            }
        };

        let (output, strategy) = parse_output_with_strategy(&raw);
        if strategy != ParseStrategy::Delimited {
            warn!(
                model,
                strategy = strategy.as_str(),
                "response did not use section markers"
            );
        }
        info!(
            model,
            strategy = strategy.as_str(),
            translation_chars = output.translation.chars().count(),
            interpretation_chars = output.interpretation.chars().count(),
            "translation parsed"
        );

        Ok(Translation {
            original_text: text.to_string(),
            model: model.to_string(),
            output,
            strategy,
            simulated,
        })
    }

    async fn complete(
        &self,
        provider: Provider,
        key: &str,
        model: &str,
        text: &str,
    ) -> Result<String, TranslateError> {
        match provider {
            Provider::Gemini => {
                GeminiClient::new(self.client.clone(), &self.endpoints.gemini, key)?
                    .generate(model, &build_combined_prompt(text), TEMPERATURE)
                    .await
            }
            Provider::OpenAi => {
                OpenAiClient::new(self.client.clone(), &self.endpoints.openai, key)?
                    .complete(model, SYSTEM_PROMPT, &build_user_prompt(text), TEMPERATURE)
                    .await
            }
        }
    }

    /// Verify the configured key against `provider`.
    ///
    /// Gemini is probed with a tiny generation on `model` (or the provider
    /// default); OpenAI by listing models.
    pub async fn check_connection(&self, provider: Provider, model: Option<&str>) -> ConnectionStatus {
        let Some(key) = &self.api_key else {
            return ConnectionStatus::failed("API Key is missing");
        };
        let model = model.unwrap_or(provider.default_model());

        let result = match provider {
            Provider::Gemini => {
                match GeminiClient::new(self.client.clone(), &self.endpoints.gemini, key) {
                    Ok(client) => client.generate(model, "Hello", TEMPERATURE).await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
            Provider::OpenAi => {
                match OpenAiClient::new(self.client.clone(), &self.endpoints.openai, key) {
                    Ok(client) => client.list_models().await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(()) => {
                info!(%provider, model, "API key verified");
                match provider {
                    Provider::Gemini => ConnectionStatus::ok("Gemini API Connected!"),
                    Provider::OpenAi => ConnectionStatus::ok("OpenAI API Connected!"),
                }
            }
            Err(e) => {
                warn!(%provider, model, error = %e, "API key check failed");
                ConnectionStatus::failed(connection_failure_message(&e))
            }
        }
    }
}

fn connection_failure_message(err: &TranslateError) -> String {
    match err {
        TranslateError::ModelNotFound { .. } => "Connection Failed: Model not found (404).".into(),
        TranslateError::InvalidApiKey | TranslateError::PermissionDenied(_) => {
            "Connection Failed: Invalid Key or Permission Denied.".into()
        }
        other => format!("Connection Failed: {other}"),
    }
}
