//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;
pub mod http;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::ChunkSink;

pub use filesystem::RecordingFileSystem;
pub use http::RecordingHttpClient;
pub use llm::RecordingLlmClient;

/// Forwards chunks to the caller's sink while keeping a copy for the cassette.
pub(crate) struct Tee<'s> {
    sink: &'s mut dyn ChunkSink,
    copy: Vec<u8>,
}

impl<'s> Tee<'s> {
    pub(crate) fn new(sink: &'s mut dyn ChunkSink) -> Self {
        Self { sink, copy: Vec::new() }
    }

    /// Everything forwarded so far, hex-encoded.
    pub(crate) fn body_hex(&self) -> String {
        hex::encode(&self.copy)
    }
}

impl ChunkSink for Tee<'_> {
    fn accept(&mut self, chunk: &[u8]) {
        self.copy.extend_from_slice(chunk);
        self.sink.accept(chunk);
    }
}

/// Record an interaction with a simple (non-Result) return value.
///
/// Mirror of `replaying::next_output` - records input/output instead of reading.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output_json = serde_json::to_value(output).unwrap_or(serde_json::Value::Null);

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction using the ok/err JSON convention.
///
/// Mirror of `replaying::replay_result` - serializes Result for recording.
///
/// Convention:
/// - `Ok(v)` is serialized as `{"ok": v}`
/// - `Err(e)` is serialized as `{"err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": serde_json::to_value(v).unwrap_or(serde_json::Value::Null) }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    record_interaction(recorder, port, method, input, &output);
}
