//! HTTP port for release lookups and archive downloads.

use serde::{Deserialize, Serialize};

pub use super::ChunkSink;
use super::PortFuture;

/// A fully buffered HTTP response, used for small JSON API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Body decoded as text.
    pub body: String,
}

/// Issues HTTP GET requests.
pub trait HttpClient: Send + Sync {
    /// Fetches `url` and buffers the whole body as text.
    ///
    /// Non-success statuses are returned, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn get<'a>(&'a self, url: &'a str) -> PortFuture<'a, HttpResponse>;

    /// Streams the body of `url` into `sink` and returns the status code.
    ///
    /// The sink only receives data when the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or reading the body fails.
    fn download<'a>(&'a self, url: &'a str, sink: &'a mut dyn ChunkSink) -> PortFuture<'a, u16>;
}
