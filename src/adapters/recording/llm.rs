//! Recording adapter for the `LlmClient` port.
//!
//! Prompts embed the whole README and folder tree, so the cassette keeps
//! only the model, the prompt length and its SHA-256.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::hasher::{ContentDigest, DigestSink};
use crate::ports::{ChunkSink, CompletionFuture, CompletionRequest, LlmClient};

/// Cassette input recorded for `llm::complete`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PromptFingerprint {
    pub(crate) model: String,
    pub(crate) prompt_chars: usize,
    pub(crate) prompt_sha256: ContentDigest,
}

impl PromptFingerprint {
    pub(crate) fn of(request: &CompletionRequest) -> Self {
        let mut sink = DigestSink::new();
        sink.accept(request.prompt.as_bytes());
        Self {
            model: request.model.clone(),
            prompt_chars: request.prompt.chars().count(),
            prompt_sha256: sink.finish(),
        }
    }
}

/// Records completions while delegating to a live model client.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Wraps `inner`, appending each completion to `recorder`.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let fingerprint = PromptFingerprint::of(request);
        let call = self.inner.complete(request);
        Box::pin(async move {
            let result = call.await;
            record_result(&self.recorder, "llm", "complete", &fingerprint, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CompletionResponse;

    struct Canned(&'static str);

    impl LlmClient for Canned {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            let text = self.0.to_string();
            Box::pin(async move { Ok(CompletionResponse { text, prompt_tokens: 10, completion_tokens: 4 }) })
        }
    }

    #[tokio::test]
    async fn records_fingerprint_instead_of_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "llm", "/repo")));
        let client = RecordingLlmClient::new(Box::new(Canned("```ruby\nend\n```")), Arc::clone(&recorder));

        let request = CompletionRequest { model: "llama3".into(), prompt: "abc".into() };
        let response = client.complete(&request).await.unwrap();
        assert_eq!(response.completion_tokens, 4);
        drop(client);

        let recorder = Arc::try_unwrap(recorder).ok().unwrap().into_inner().unwrap();
        recorder.finish().unwrap();
        let cassette = crate::cassette::format::Cassette::load(&path).unwrap();
        let interaction = &cassette.interactions[0];

        let input: PromptFingerprint = serde_json::from_value(interaction.input.clone()).unwrap();
        assert_eq!(input.model, "llama3");
        assert_eq!(input.prompt_chars, 3);
        assert_eq!(
            input.prompt_sha256.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(interaction.output["ok"]["text"], "```ruby\nend\n```");
    }
}
