//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::{next_exchange, replay_result};
use crate::adapters::recording::llm::PromptFingerprint;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Serves recorded completions from a cassette.
///
/// The recorded reply is returned even when the request no longer matches
/// what was recorded; the drift is logged.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

/// Describes how `request` differs from the recorded fingerprint, if at all.
fn drift(recorded: &serde_json::Value, request: &CompletionRequest) -> Option<String> {
    let recorded: PromptFingerprint = serde_json::from_value(recorded.clone()).ok()?;
    let current = PromptFingerprint::of(request);
    if recorded.model != current.model {
        Some(format!("model was {}, now {}", recorded.model, current.model))
    } else if recorded.prompt_sha256 != current.prompt_sha256 {
        Some(format!("prompt changed ({} -> {} chars)", recorded.prompt_chars, current.prompt_chars))
    } else {
        None
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let (input, output) = next_exchange(&self.replayer, "llm", "complete");
        if let Some(change) = drift(&input, request) {
            tracing::warn!(%change, "replayed completion was recorded for a different request");
        }
        Box::pin(async move { replay_result(output, "llm::complete") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn request(model: &str, prompt: &str) -> CompletionRequest {
        CompletionRequest { model: model.into(), prompt: prompt.into() }
    }

    fn client(output: serde_json::Value) -> ReplayingLlmClient {
        ReplayingLlmClient::new(CassetteReplayer::new(&Cassette {
            name: "llm".into(),
            recorded_at: Utc::now(),
            source: "/repo".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "llm".into(),
                method: "complete".into(),
                input: json!({"model": "llama3", "prompt_chars": 3, "prompt_sha256": ABC}),
                output,
            }],
        }))
    }

    #[test]
    fn matching_request_has_no_drift() {
        let input = json!({"model": "llama3", "prompt_chars": 3, "prompt_sha256": ABC});
        assert_eq!(drift(&input, &request("llama3", "abc")), None);
    }

    #[test]
    fn drift_names_what_changed() {
        let input = json!({"model": "llama3", "prompt_chars": 3, "prompt_sha256": ABC});
        assert_eq!(drift(&input, &request("codellama", "abc")).unwrap(), "model was llama3, now codellama");
        assert_eq!(drift(&input, &request("llama3", "abcd")).unwrap(), "prompt changed (3 -> 4 chars)");
        assert_eq!(drift(&json!({"model": "llama3"}), &request("mistral", "x")), None);
    }

    #[tokio::test]
    async fn changed_prompt_still_replays() {
        let llm = client(json!({"ok": {"text": "```ruby\nend\n```", "prompt_tokens": 3}}));
        let response = llm.complete(&request("llama3", "a different prompt")).await.unwrap();
        assert_eq!(response.text, "```ruby\nend\n```");
        assert_eq!(response.prompt_tokens, 3);
        assert_eq!(response.completion_tokens, 0);
    }

    #[tokio::test]
    async fn recorded_failure_replays_as_error() {
        let llm = client(json!({"err": "cannot connect to Ollama at http://localhost:11434. Is Ollama running?"}));
        let err = llm.complete(&request("llama3", "abc")).await.unwrap_err();
        assert!(err.to_string().contains("Is Ollama running?"));
    }
}
