//! LlmClient trait definition

use async_trait::async_trait;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Text-generation collaborator
///
/// Each call is independent: the client keeps no conversation state, so any
/// history a prompt needs must be rendered into the request by the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Generate text for a single prompt string
    ///
    /// A response without text is an error, so callers never mistake an
    /// empty reply for a real answer.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        debug!(prompt_len = prompt.len(), %max_tokens, "LlmClient::generate: called");
        let response = self.complete(CompletionRequest::from_prompt(prompt, max_tokens)).await?;
        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => {
                debug!(stop_reason = ?response.stop_reason, "LlmClient::generate: empty response");
                Err(LlmError::EmptyResponse)
            }
        }
    }
}
