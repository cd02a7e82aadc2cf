//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::{ChunkSink, PortError};

/// Chunk size used when feeding a recorded file back into a sink.
const REPLAY_CHUNK: usize = 4096;

/// A recorded streamed read.
#[derive(Deserialize)]
struct RecordedChunks {
    #[serde(default)]
    body_hex: String,
}

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(output, "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        let output = next_output(&self.replayer, "fs", "write");
        if let Some(err) = output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(msg.into());
        }
        Ok(())
    }

    fn read_chunks(&self, _path: &Path, sink: &mut dyn ChunkSink) -> Result<u64, PortError> {
        let output = next_output(&self.replayer, "fs", "read_chunks");
        let recorded: RecordedChunks = replay_result(output, "fs::read_chunks")?;
        let body = hex::decode(&recorded.body_hex)
            .map_err(|e| format!("fs::read_chunks: invalid body_hex: {e}"))?;
        for chunk in body.chunks(REPLAY_CHUNK) {
            sink.accept(chunk);
        }
        Ok(body.len() as u64)
    }

    fn exists(&self, _path: &Path) -> bool {
        let output = next_output(&self.replayer, "fs", "exists");
        output.as_bool().expect("fs::exists: expected boolean output")
    }

    fn list_dir(&self, _path: &Path) -> Result<Vec<DirEntry>, PortError> {
        let output = next_output(&self.replayer, "fs", "list_dir");
        replay_result(output, "fs::list_dir")
    }
}
