use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("text content cannot be empty")]
    EmptySource,

    #[error("text too long: {len} characters, limit is {max}")]
    SourceTooLong { len: usize, max: usize },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}
