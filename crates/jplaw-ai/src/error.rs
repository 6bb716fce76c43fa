use jplaw_core::{CoreError, Provider};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key is missing")]
    MissingApiKey,

    #[error("no response text from {provider}")]
    EmptyResponse { provider: Provider },

    #[error("model \"{model}\" not found (404); the key may not have access to it")]
    ModelNotFound { model: String },

    #[error("the API key is invalid; check for extra spaces or typos")]
    InvalidApiKey,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error(transparent)]
    Source(#[from] CoreError),
}
