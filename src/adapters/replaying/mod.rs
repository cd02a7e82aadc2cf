//! Replaying adapters that replay recorded interactions.

pub mod filesystem;
pub mod http;
pub mod llm;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

pub use filesystem::ReplayingFileSystem;
pub use http::ReplayingHttpClient;
pub use llm::ReplayingLlmClient;

/// Pops the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Pops the next recorded interaction for `port::method`, returning its
/// recorded input and output.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette is exhausted.
pub(crate) fn next_exchange(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> (serde_json::Value, serde_json::Value) {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    let interaction = replayer.next_interaction(port, method);
    (interaction.input.clone(), interaction.output.clone())
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`; a bare value is
/// treated as `ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
