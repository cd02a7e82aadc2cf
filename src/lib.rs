//! Core library entry for the `brewgen` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod formula;
pub mod hasher;
pub mod metadata;
pub mod ports;
pub mod prompt;
pub mod release;
pub mod remote;
pub mod tree;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print their text and succeed.
///
/// # Errors
///
/// Returns [`error::Error::Usage`] when argument parsing fails, or the
/// pipeline error when generation fails.
pub fn run<I, T>(args: I) -> error::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(error::Error::Usage(err.to_string())),
    };
    commands::dispatch(&cli.into_config())
}
