//! Live HTTP and Ollama adapters against a local mock server.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brewgen::adapters::capturing::CapturingConsole;
use brewgen::adapters::live::http::LiveHttpClient;
use brewgen::adapters::live::llm::OllamaClient;
use brewgen::error::Error;
use brewgen::hasher::digest_url;
use brewgen::ports::{CompletionRequest, LlmClient};
use brewgen::release::latest_release_tag;
use brewgen::remote::{HostingProvider, RemoteIdentity};

fn widget() -> RemoteIdentity {
    RemoteIdentity { owner: "acme".into(), name: "widget".into() }
}

#[tokio::test]
async fn latest_release_reads_tag_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/releases/latest"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tag_name":"v2.0.1"}"#))
        .expect(1)
        .mount(&server)
        .await;
    let provider = HostingProvider::github().with_endpoints(server.uri(), server.uri());
    let console = CapturingConsole::new();

    let tag = latest_release_tag(&LiveHttpClient::anonymous(), &console, &provider, &widget()).await;

    assert_eq!(tag.as_deref(), Some("v2.0.1"));
}

#[tokio::test]
async fn missing_release_is_reported_as_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/releases/latest"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&server)
        .await;
    let provider = HostingProvider::github().with_endpoints(server.uri(), server.uri());
    let console = CapturingConsole::new();

    let tag = latest_release_tag(&LiveHttpClient::anonymous(), &console, &provider, &widget()).await;

    assert_eq!(tag, None);
    assert!(console.contains("[info] No releases found"));
}

#[tokio::test]
async fn archive_download_is_hashed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme/widget/archive/refs/tags/v2.0.1.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
        .mount(&server)
        .await;
    let provider = HostingProvider::github().with_endpoints(server.uri(), server.uri());
    let url = provider.archive_url(&widget(), "v2.0.1");

    let digest = digest_url(&LiveHttpClient::anonymous(), &url).await.unwrap();

    assert_eq!(digest.as_str(), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[tokio::test]
async fn archive_not_found_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let url = format!("{}/acme/widget/archive/refs/tags/v9.tar.gz", server.uri());

    let err = digest_url(&LiveHttpClient::anonymous(), &url).await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 404, .. }));
}

#[tokio::test]
async fn ollama_chat_returns_reply_and_token_counts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({"model": "llama3", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3",
            "message": {"role": "assistant", "content": "```ruby\nclass Widget < Formula\nend\n```"},
            "done": true,
            "prompt_eval_count": 512,
            "eval_count": 48
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = OllamaClient::new(server.uri());
    let request = CompletionRequest { model: "llama3".into(), prompt: "formula please".into() };

    let response = client.complete(&request).await.unwrap();

    assert!(response.text.starts_with("```ruby"));
    assert_eq!(response.prompt_tokens, 512);
    assert_eq!(response.completion_tokens, 48);
}

#[tokio::test]
async fn ollama_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "model 'nope' not found"})),
        )
        .mount(&server)
        .await;
    let client = OllamaClient::new(server.uri());
    let request = CompletionRequest { model: "nope".into(), prompt: "p".into() };

    let err = client.complete(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "Ollama API error (404): model 'nope' not found");
}
