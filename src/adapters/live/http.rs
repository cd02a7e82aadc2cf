//! Live adapter for the `HttpClient` port using `reqwest`.

use std::env;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};

use crate::ports::http::{ChunkSink, HttpClient, HttpResponse};
use crate::ports::PortFuture;

const AGENT: &str = concat!("brewgen/", env!("CARGO_PKG_VERSION"));

/// Live HTTP client. No timeout is configured beyond the `reqwest` defaults.
pub struct LiveHttpClient {
    client: Client,
    token: Option<String>,
}

impl LiveHttpClient {
    /// Creates a client that authenticates API calls with `GITHUB_TOKEN` when it is set.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new(), token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()) }
    }

    /// Creates a client that never sends credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { client: Client::new(), token: None }
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let builder = self.client.get(url).header(USER_AGENT, AGENT);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl Default for LiveHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for LiveHttpClient {
    fn get<'a>(&'a self, url: &'a str) -> PortFuture<'a, HttpResponse> {
        Box::pin(async move {
            let response = self
                .request(url)
                .header(ACCEPT, "application/vnd.github+json")
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            tracing::debug!(url, status, bytes = body.len(), "GET complete");
            Ok(HttpResponse { status, body })
        })
    }

    fn download<'a>(&'a self, url: &'a str, sink: &'a mut dyn ChunkSink) -> PortFuture<'a, u16> {
        Box::pin(async move {
            let mut response = self.request(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                tracing::debug!(url, status = status.as_u16(), "download refused");
                return Ok(status.as_u16());
            }

            let mut total = 0usize;
            while let Some(chunk) = response.chunk().await? {
                total += chunk.len();
                sink.accept(&chunk);
            }
            tracing::debug!(url, bytes = total, "download complete");
            Ok(status.as_u16())
        })
    }
}
