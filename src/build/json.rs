//! Recovering structured JSON from model completions.
//!
//! Parse policy, in order:
//! 1. the whole (trimmed) completion as JSON,
//! 2. the first balanced `{...}` span in the completion,
//! 3. give up with a [`ParseError`].

use serde::de::DeserializeOwned;

/// A completion that doesn't match the shape a stage expects.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found in completion")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema violation: {0}")]
    Schema(String),

    #[error("completion produced an empty document")]
    EmptyDocument,
}

/// Parse a completion into `T` using the strict-then-extract policy.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let strict_err = match serde_json::from_str(text.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let span = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    tracing::debug!(
        error = %strict_err,
        extracted_len = span.len(),
        completion_len = text.len(),
        "strict JSON parse failed, retrying with extracted object"
    );

    Ok(serde_json::from_str(span)?)
}

/// Find the first balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals don't count towards nesting.
/// Returns `None` if there is no `{`, or the first `{` is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
