//! Completion service boundary.
//!
//! Every stage talks to the language model through [`CompletionClient`]:
//! one system prompt, one user prompt, one temperature, one block of text
//! back. Failures are reported as [`CompletionError`] and never retried here.

#[cfg(test)]
pub mod mock;
mod openai;

use async_trait::async_trait;

pub use openai::OpenAiClient;

/// Errors raised by the completion service.
#[derive(thiserror::Error, Debug)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service rejected the credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("completion service rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("completion service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    InvalidResponse(String),
}

/// A hosted text-generation service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model or service identifier, for logs.
    fn name(&self) -> &str;

    /// Send one system/user prompt pair and return the generated text.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, CompletionError>;
}
