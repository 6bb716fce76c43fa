//! Request plumbing shared by the provider clients.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::TranslateError;

/// Send `request` and decode a JSON body, mapping failure statuses onto
/// [`TranslateError`] variants.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    model: &str,
) -> Result<T, TranslateError> {
    let resp = request.send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(classify_status(status.as_u16(), &body, model));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Map a non-success provider response to an error.
///
/// Both Gemini and OpenAI report failures as `{"error": {"message": ...}}`.
pub(crate) fn classify_status(status: u16, body: &str, model: &str) -> TranslateError {
    let message = error_message(body);
    match status {
        404 => TranslateError::ModelNotFound {
            model: model.to_string(),
        },
        400 if message.contains("API key not valid") => TranslateError::InvalidApiKey,
        401 => TranslateError::InvalidApiKey,
        403 => TranslateError::PermissionDenied(message),
        429 => TranslateError::RateLimited,
        _ => TranslateError::Server {
            status,
            body: message,
        },
    }
}

/// The provider's `error.message`, or the raw body when it has none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
