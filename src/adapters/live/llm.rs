//! Live adapter for the `LlmClient` port using a local Ollama server.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Default address of a locally running Ollama server.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Live LLM client that calls Ollama's chat endpoint.
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    /// Creates a client for the Ollama server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string(), client: Client::new() }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_HOST)
    }
}

/// Request body sent to `/api/chat`.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Non-streaming response from `/api/chat`.
#[derive(Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Error body returned by Ollama, e.g. for a model that is not pulled.
#[derive(Deserialize)]
struct OllamaError {
    error: String,
}

impl LlmClient for OllamaClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();

        Box::pin(async move {
            let body = ChatRequest {
                model: &model,
                messages: vec![ChatMessage { role: "user", content: &prompt }],
                stream: false,
            };

            let url = format!("{}/api/chat", self.base_url);
            let start = Instant::now();
            let response = self.client.post(&url).json(&body).send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    if e.is_connect() {
                        format!("cannot connect to Ollama at {}. Is Ollama running?", self.base_url)
                            .into()
                    } else {
                        format!("Ollama request failed: {e}").into()
                    }
                },
            )?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                let msg = serde_json::from_str::<OllamaError>(&response_text)
                    .map(|e| e.error)
                    .unwrap_or(response_text);
                return Err(format!("Ollama API error ({}): {msg}", status.as_u16()).into());
            }

            let chat: ChatResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to parse Ollama response: {e}").into()
                },
            )?;

            tracing::info!(
                model = %model,
                elapsed_secs = start.elapsed().as_secs_f64(),
                prompt_tokens = chat.prompt_eval_count,
                completion_tokens = chat.eval_count,
                "Ollama response received"
            );

            Ok(CompletionResponse {
                text: chat.message.content,
                prompt_tokens: chat.prompt_eval_count,
                completion_tokens: chat.eval_count,
            })
        })
    }
}
