use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
