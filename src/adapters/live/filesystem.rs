//! Live filesystem adapter using `std::fs`.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::{ChunkSink, PortError};

/// Read size for streamed file reads.
const READ_CHUNK: usize = 4096;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn read_chunks(&self, path: &Path, sink: &mut dyn ChunkSink) -> Result<u64, PortError> {
        let mut file = File::open(path)?;
        let mut buf = [0u8; READ_CHUNK];
        let mut total = 0u64;
        loop {
            let n = match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            sink.accept(&buf[..n]);
            total += n as u64;
        }
        Ok(total)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Symlinks are listed but never reported as directories, so a walk
    /// built on this does not follow them.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(name) => name.to_string(),
                None => {
                    let lossy = file_name.to_string_lossy().into_owned();
                    tracing::warn!(dir = %path.display(), name = %lossy, "entry name is not valid UTF-8");
                    lossy
                }
            };
            entries.push(DirEntry { name, is_dir: entry.file_type()?.is_dir() });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
