//! Google Gemini `generateContent` client.

use jplaw_core::Provider;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::TranslateError;
use crate::http::send_json;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// `base_url` should be like `https://generativelanguage.googleapis.com`
    /// (no trailing slash needed). The key is trimmed; a blank key is refused.
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

    /// Run a single-turn generation and return the response text.
    pub async fn generate(&self, model: &str, prompt: &str, temperature: f32) -> Result<String, TranslateError> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);

        info!(model, prompt_chars = prompt.chars().count(), "calling Gemini");
        let request = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(prompt, temperature));
        let resp: GenerateResponse = send_json(request, model).await?;

        let text = response_text(&resp).ok_or(TranslateError::EmptyResponse {
            provider: Provider::Gemini,
        })?;
        info!(model, response_chars = text.chars().count(), "Gemini responded");
        Ok(text)
    }
}

fn request_body(prompt: &str, temperature: f32) -> Value {
    json!({
        "contents": [
            { "role": "user", "parts": [{ "text": prompt }] }
        ],
        "generationConfig": { "temperature": temperature }
    })
}

/// Concatenated text parts of the first candidate, if any are non-empty.
fn response_text(resp: &GenerateResponse) -> Option<String> {
    let parts = &resp.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_body_shape() {
        let body = request_body("翻訳して", 0.1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "翻訳して");
        let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.1).abs() < 1e-6);
    }

    #[test]
    fn text_from_first_candidate() {
        let resp = parse(
            r#"{"candidates":[
                {"content":{"role":"model","parts":[{"text":"---TRANSLATION_START---"},{"text":"译文"}]},"finishReason":"STOP"},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        );
        assert_eq!(response_text(&resp).as_deref(), Some("---TRANSLATION_START---译文"));
    }

    #[test]
    fn no_candidates_is_empty() {
        assert_eq!(response_text(&parse(r#"{"candidates":[]}"#)), None);
        assert_eq!(response_text(&parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)), None);
    }

    #[test]
    fn candidate_without_text_is_empty() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert_eq!(response_text(&resp), None);
        let resp = parse(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(response_text(&resp), None);
    }

    #[test]
    fn key_is_trimmed_and_required() {
        let client = GeminiClient::new(reqwest::Client::new(), "https://example.test/", "  abc \n").unwrap();
        assert_eq!(client.api_key, "abc");
        assert_eq!(client.base_url, "https://example.test");

        assert!(matches!(
            GeminiClient::new(reqwest::Client::new(), GEMINI_BASE_URL, "   "),
            Err(TranslateError::MissingApiKey)
        ));
    }
}
