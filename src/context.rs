//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::capturing::CapturingConsole;
use crate::adapters::live::console::TerminalConsole;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::http::LiveHttpClient;
use crate::adapters::live::llm::OllamaClient;
use crate::adapters::recording::{RecordingFileSystem, RecordingHttpClient, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingHttpClient, ReplayingLlmClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::console::Console;
use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::http::{ChunkSink, HttpClient, HttpResponse};
use crate::ports::llm::{CompletionFuture, CompletionRequest, LlmClient};
use crate::ports::{PortError, PortFuture};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Filesystem for repository reads and the formula write.
    pub fs: Box<dyn FileSystem>,
    /// HTTP client for release lookups and archive downloads.
    pub http: Box<dyn HttpClient>,
    /// LLM client for formula generation.
    pub llm: Box<dyn LlmClient>,
    /// Sink for user-facing output.
    pub console: Box<dyn Console>,
}

impl ServiceContext {
    /// Assembles a context from explicit adapters.
    #[must_use]
    pub fn new(
        fs: Box<dyn FileSystem>,
        http: Box<dyn HttpClient>,
        llm: Box<dyn LlmClient>,
        console: Box<dyn Console>,
    ) -> Self {
        Self { fs, http, llm, console }
    }

    /// Creates a live context talking to the Ollama server at `ollama_host`.
    #[must_use]
    pub fn live(ollama_host: &str) -> Self {
        Self::new(
            Box::new(LiveFileSystem),
            Box::new(LiveHttpClient::new()),
            Box::new(OllamaClient::new(ollama_host)),
            Box::new(TerminalConsole),
        )
    }

    /// Creates a live context whose fs, http and llm interactions are
    /// recorded into a new session under `base`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: &Path,
        source: &str,
        ollama_host: &str,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base, source)?;
        let ctx = Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            Box::new(RecordingHttpClient::new(Box::new(LiveHttpClient::new()), session.http.clone())),
            Box::new(RecordingLlmClient::new(
                Box::new(OllamaClient::new(ollama_host)),
                session.llm.clone(),
            )),
            Box::new(TerminalConsole),
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from per-port cassette files, with
    /// output going to a [`CapturingConsole`].
    ///
    /// Ports without a configured cassette file use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self::new(
            match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            match replayers.http {
                Some(r) => Box::new(ReplayingHttpClient::new(r)),
                None => Box::new(PanickingHttpClient),
            },
            match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
            Box::new(CapturingConsole::new()),
        ))
    }

    /// Replaces the filesystem adapter.
    #[must_use]
    pub fn with_fs(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the console adapter.
    #[must_use]
    pub fn with_console(mut self, console: Box<dyn Console>) -> Self {
        self.console = console;
        self
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn read_chunks(&self, _path: &Path, _sink: &mut dyn ChunkSink) -> Result<u64, PortError> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn list_dir(&self, _path: &Path) -> Result<Vec<DirEntry>, PortError> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingHttpClient;
impl HttpClient for PanickingHttpClient {
    fn get<'a>(&'a self, _url: &'a str) -> PortFuture<'a, HttpResponse> {
        panic!("HttpClient port not configured in CassetteConfig: no cassette loaded for http");
    }
    fn download<'a>(&'a self, _url: &'a str, _sink: &'a mut dyn ChunkSink) -> PortFuture<'a, u16> {
        panic!("HttpClient port not configured in CassetteConfig: no cassette loaded for http");
    }
}

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}
