//! Crate-wide error type.

use std::path::PathBuf;

/// Errors surfaced by formula generation.
///
/// Conditions that only degrade a metadata field (missing README, unparseable
/// remote, no releases) never become an `Error`; they are reported through the
/// console and the field is left empty.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// A required local file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A remote endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// The requested URL.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The request never produced a response (connection, TLS, body read).
    #[error("request to {url} failed: {message}")]
    Transport {
        /// The requested URL.
        url: String,
        /// Underlying failure description.
        message: String,
    },

    /// The model response held no recognizable formula block.
    #[error("no ```ruby code block found in the model response")]
    Extraction,

    /// The language model call failed.
    #[error("language model request failed: {0}")]
    Llm(String),

    /// A cassette recording session could not be set up or written.
    #[error("recording failed: {0}")]
    Recording(String),

    /// Local I/O failure.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
