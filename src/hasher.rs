//! SHA-256 content digests for local files and downloaded archives.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::ports::{ChunkSink, FileSystem, HttpClient};

/// Lower-case hex SHA-256 digest (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// The digest as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental hasher usable as a download sink.
#[derive(Default)]
pub struct DigestSink {
    hasher: Sha256,
    bytes: u64,
}

impl DigestSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Consumes the sink and returns the digest of everything it received.
    #[must_use]
    pub fn finish(self) -> ContentDigest {
        ContentDigest(hex::encode(self.hasher.finalize()))
    }
}

impl ChunkSink for DigestSink {
    fn accept(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes += chunk.len() as u64;
    }
}

/// Digest of the file at `path`, streamed through the filesystem port.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist and [`Error::Io`]
/// for any other read failure.
pub fn digest_file(fs: &dyn FileSystem, path: &Path) -> Result<ContentDigest> {
    if !fs.exists(path) {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }
    let mut sink = DigestSink::new();
    fs.read_chunks(path, &mut sink).map_err(|e| Error::Io {
        context: format!("failed to read {}", path.display()),
        source: std::io::Error::other(e),
    })?;
    tracing::debug!(path = %path.display(), bytes = sink.bytes(), "archive hashed");
    Ok(sink.finish())
}

/// Streams `url` through the HTTP port and returns the digest of its body.
///
/// # Errors
///
/// Returns [`Error::Http`] for a non-success status and [`Error::Transport`]
/// when the request or body read fails.
pub async fn digest_url(http: &dyn HttpClient, url: &str) -> Result<ContentDigest> {
    let mut sink = DigestSink::new();
    let status = http
        .download(url, &mut sink)
        .await
        .map_err(|e| Error::Transport { url: url.to_string(), message: e.to_string() })?;
    if !(200..300).contains(&status) {
        return Err(Error::Http { url: url.to_string(), status });
    }
    tracing::debug!(url, bytes = sink.bytes(), "archive hashed");
    Ok(sink.finish())
}
