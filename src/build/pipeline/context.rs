//! Pipeline context for sharing services across stages.

use super::{StageError, StageName};
use crate::build::prompts::PromptRenderer;
use crate::build::request::GenerationRequest;
use crate::llm::CompletionClient;

/// Shared, read-only context for pipeline stages.
pub struct PipelineContext<'a> {
    /// Completion service every stage talks to
    pub client: &'a dyn CompletionClient,

    /// User prompt templates
    pub prompts: &'a PromptRenderer,

    /// The request being fulfilled
    pub request: &'a GenerationRequest,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        client: &'a dyn CompletionClient,
        prompts: &'a PromptRenderer,
        request: &'a GenerationRequest,
    ) -> Self {
        Self {
            client,
            prompts,
            request,
        }
    }

    /// Send one request on behalf of `stage` and wait for the full completion.
    pub async fn complete(
        &self,
        stage: StageName,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, StageError> {
        tracing::debug!(
            %stage,
            client = self.client.name(),
            system_len = system_prompt.len(),
            user_len = user_prompt.len(),
            temperature,
            "requesting completion"
        );

        let text = self
            .client
            .complete(system_prompt, user_prompt, temperature)
            .await?;

        tracing::debug!(%stage, completion_len = text.len(), "completion received");
        Ok(text)
    }
}
