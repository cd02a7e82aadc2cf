//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the formula pipeline and an
//! external system (filesystem, HTTP, language model, console).
//! Implementations live in `src/adapters/`.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

pub mod console;
pub mod filesystem;
pub mod http;
pub mod llm;

pub use console::Console;
pub use filesystem::{DirEntry, FileSystem};
pub use http::{HttpClient, HttpResponse};
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Error type returned by every port method.
pub type PortError = Box<dyn Error + Send + Sync>;

/// Receives a byte stream chunk by chunk.
pub trait ChunkSink: Send {
    /// Consumes the next chunk of the stream.
    fn accept(&mut self, chunk: &[u8]);
}

/// Boxed future returned by async ports so the traits stay dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
