//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use serde::Deserialize;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{ChunkSink, HttpClient, HttpResponse};
use crate::ports::PortFuture;

/// Chunk size used when feeding a recorded body back into a sink.
const REPLAY_CHUNK: usize = 8192;

/// A recorded download: status plus the hex-encoded body.
#[derive(Debug, Deserialize)]
struct RecordedDownload {
    status: u16,
    #[serde(default)]
    body_hex: String,
}

/// Replays recorded HTTP exchanges from a cassette.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a new replaying HTTP client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get<'a>(&'a self, _url: &'a str) -> PortFuture<'a, HttpResponse> {
        let output = next_output(&self.replayer, "http", "get");
        Box::pin(async move { replay_result(output, "http::get") })
    }

    fn download<'a>(&'a self, _url: &'a str, sink: &'a mut dyn ChunkSink) -> PortFuture<'a, u16> {
        let output = next_output(&self.replayer, "http", "download");
        Box::pin(async move {
            let recorded: RecordedDownload = replay_result(output, "http::download")?;
            if (200..300).contains(&recorded.status) {
                let body = hex::decode(&recorded.body_hex)
                    .map_err(|e| format!("http::download: invalid body_hex: {e}"))?;
                for chunk in body.chunks(REPLAY_CHUNK) {
                    sink.accept(chunk);
                }
            }
            Ok(recorded.status)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    struct Collect(Vec<u8>);

    impl ChunkSink for Collect {
        fn accept(&mut self, chunk: &[u8]) {
            self.0.extend_from_slice(chunk);
        }
    }

    fn client(interactions: Vec<Interaction>) -> ReplayingHttpClient {
        let cassette = Cassette {
            name: "http".into(),
            recorded_at: Utc::now(),
            source: "/repo".into(),
            interactions,
        };
        ReplayingHttpClient::new(CassetteReplayer::new(&cassette))
    }

    #[tokio::test]
    async fn download_feeds_decoded_body() {
        let http = client(vec![Interaction {
            seq: 0,
            port: "http".into(),
            method: "download".into(),
            input: json!({"url": "https://github.com/acme/widget/archive/refs/tags/v1.tar.gz"}),
            output: json!({"ok": {"status": 200, "body_hex": "616263"}}),
        }]);
        let mut sink = Collect(Vec::new());
        let status = http.download("ignored", &mut sink).await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(sink.0, b"abc");
    }

    #[tokio::test]
    async fn failed_download_leaves_sink_untouched() {
        let http = client(vec![Interaction {
            seq: 0,
            port: "http".into(),
            method: "download".into(),
            input: json!({}),
            output: json!({"ok": {"status": 404, "body_hex": "6e6f"}}),
        }]);
        let mut sink = Collect(Vec::new());
        assert_eq!(http.download("ignored", &mut sink).await.unwrap(), 404);
        assert!(sink.0.is_empty());
    }

    #[tokio::test]
    async fn get_replays_status_and_body() {
        let http = client(vec![Interaction {
            seq: 0,
            port: "http".into(),
            method: "get".into(),
            input: json!({}),
            output: json!({"ok": {"status": 200, "body": "{\"tag_name\":\"v1\"}"}}),
        }]);
        let response = http.get("ignored").await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("tag_name"));
    }
}
