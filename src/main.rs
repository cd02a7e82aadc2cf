//! Binary entrypoint for the `brewgen` CLI.

use std::process::ExitCode;

use brewgen::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Recording is handled in commands::dispatch via BREWGEN_RECORD=<dir>.
    match brewgen::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::Usage(_)) => {
            // clap has already formatted the message, prefix included.
            eprint!("{err}");
            ExitCode::from(err.exit_code())
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
