//! OpenAI chat completions client.

use jplaw_core::Provider;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::TranslateError;
use crate::http::send_json;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI REST API.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

impl OpenAiClient {
    /// `base_url` should be like `https://api.openai.com` (no `/v1`).
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: &str,
    ) -> Result<Self, TranslateError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TranslateError::MissingApiKey);
        }
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Run a system + user chat completion and return the reply text.
    pub async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, TranslateError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        info!(model, prompt_chars = user.chars().count(), "calling OpenAI");
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body(model, system, user, temperature));
        let resp: ChatResponse = send_json(request, model).await?;

        let text = reply_text(resp).ok_or(TranslateError::EmptyResponse {
            provider: Provider::OpenAi,
        })?;
        info!(model, response_chars = text.chars().count(), "OpenAI responded");
        Ok(text)
    }

    /// List model ids visible to the key. Used to verify credentials.
    pub async fn list_models(&self) -> Result<Vec<String>, TranslateError> {
        let url = format!("{}/v1/models", self.base_url);
        let request = self.client.get(&url).bearer_auth(&self.api_key);
        let list: ModelList = send_json(request, "").await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}

fn request_body(model: &str, system: &str, user: &str, temperature: f32) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user }
        ],
        "temperature": temperature
    })
}

fn reply_text(resp: ChatResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .next()?
        .message
        .content
        .filter(|c| !c.is_empty())
}
