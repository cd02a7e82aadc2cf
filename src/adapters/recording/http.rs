//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_result, Tee};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{ChunkSink, HttpClient, HttpResponse};
use crate::ports::PortFuture;

/// Records HTTP interactions while delegating to an inner implementation.
///
/// Downloaded bodies are stored hex-encoded, so recording a large archive
/// produces a correspondingly large cassette.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording HTTP client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct DownloadOutput {
    status: u16,
    body_hex: String,
}

impl HttpClient for RecordingHttpClient {
    fn get<'a>(&'a self, url: &'a str) -> PortFuture<'a, HttpResponse> {
        Box::pin(async move {
            let result = self.inner.get(url).await;
            record_result(&self.recorder, "http", "get", &UrlInput { url }, &result);
            result
        })
    }

    fn download<'a>(&'a self, url: &'a str, sink: &'a mut dyn ChunkSink) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let mut tee = Tee::new(sink);
            let result = self.inner.download(url, &mut tee).await;
            let recorded = result
                .as_ref()
                .map(|status| DownloadOutput { status: *status, body_hex: tee.body_hex() });
            record_result(&self.recorder, "http", "download", &UrlInput { url }, &recorded);
            result
        })
    }
}
