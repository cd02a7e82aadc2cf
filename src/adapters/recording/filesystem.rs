//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result, Tee};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::{ChunkSink, PortError};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct ChunksOutput {
    bytes: u64,
    body_hex: String,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a str,
    contents: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, "fs", "read_to_string", &input, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: &path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn read_chunks(&self, path: &Path, sink: &mut dyn ChunkSink) -> Result<u64, PortError> {
        let mut tee = Tee::new(sink);
        let result = self.inner.read_chunks(path, &mut tee);
        let recorded = result.as_ref().map(|bytes| ChunksOutput { bytes: *bytes, body_hex: tee.body_hex() });
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, "fs", "read_chunks", &input, &recorded);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let input = PathInput { path: &path.display().to_string() };
        record_interaction(&self.recorder, "fs", "exists", &input, &result);
        result
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError> {
        let result = self.inner.list_dir(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, "fs", "list_dir", &input, &result);
        result
    }
}
