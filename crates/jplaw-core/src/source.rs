//! Validation of source text before it is sent to a provider.

use crate::CoreError;

/// Upper bound on source length, in characters.
pub const MAX_SOURCE_CHARS: usize = 35_000;

/// Check that `text` is worth sending: non-blank and within [`MAX_SOURCE_CHARS`].
pub fn validate_source(text: &str) -> Result<&str, CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::EmptySource);
    }
    let len = text.chars().count();
    if len > MAX_SOURCE_CHARS {
        return Err(CoreError::SourceTooLong {
            len,
            max: MAX_SOURCE_CHARS,
        });
    }
    Ok(text)
}
