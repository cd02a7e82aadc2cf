//! Filesystem port for file I/O operations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ChunkSink, PortError};

/// A single directory entry returned by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Base name of the entry.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Provides filesystem access for reading and writing files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Streams the raw bytes of a file into `sink` and returns how many
    /// bytes were read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a read fails; the
    /// sink may already have received part of the file.
    fn read_chunks(&self, path: &Path, sink: &mut dyn ChunkSink) -> Result<u64, PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entries in a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError>;
}
