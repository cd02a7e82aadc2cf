//! LLM client port for language-model completions.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type CompletionFuture<'a> = PortFuture<'a, CompletionResponse>;

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model identifier (e.g. `"llama3"`).
    pub model: String,
    /// The single user message to send.
    pub prompt: String,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
    /// Number of prompt tokens consumed.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of completion tokens generated.
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (model not pulled, server down, etc.).
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
