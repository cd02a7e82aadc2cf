//! Command dispatch and handlers.

pub mod generate;

use std::env;
use std::path::PathBuf;

use crate::config::GenerateConfig;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::remote::HostingProvider;

/// Environment variable naming a directory to record cassettes into.
pub const RECORD_ENV: &str = "BREWGEN_RECORD";

/// Run formula generation for `config` against live services.
///
/// When `BREWGEN_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files in a timestamped directory below it.
///
/// # Errors
///
/// Returns an error if the runtime cannot start, the recording session
/// cannot be created, or generation fails.
pub fn dispatch(config: &GenerateConfig) -> Result<()> {
    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV) {
        let source = config.repo_dir.display().to_string();
        let (ctx, session) =
            ServiceContext::recording_at(&PathBuf::from(path), &source, &config.ollama_host)
                .map_err(Error::Recording)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config.ollama_host), None)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Io { context: "failed to start async runtime".into(), source: e })?;
    let result = runtime
        .block_on(generate::run(&ctx, &HostingProvider::github(), config))
        .map(|_| ());

    // Finish recording after the command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        let output_dir = session.finish().map_err(Error::Recording)?;
        eprintln!("Recording saved to: {}", output_dir.display());
    }

    result
}
