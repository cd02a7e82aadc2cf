//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::adapters::live::llm::DEFAULT_OLLAMA_HOST;
use crate::config::{self, GenerateConfig, TagRequest};
use crate::tree::TreeOptions;

/// Top-level CLI parser for `brewgen`.
#[derive(Debug, Parser)]
#[command(
    name = "brewgen",
    version,
    about = "AI-powered Homebrew formula generator for a cloned repository"
)]
pub struct Cli {
    /// Location of the cloned repository.
    #[arg(short = 'r', long, value_name = "PATH")]
    pub repo_dir: PathBuf,

    /// Where to save the formula file (`.rb` is appended if missing).
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT, value_name = "PATH")]
    pub output: PathBuf,

    /// Release tag, or `latest` to use the newest published release.
    #[arg(short, long, default_value = config::LATEST_TAG)]
    pub tag: String,

    /// Name of the Ollama model.
    #[arg(short, long, default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Ollama server.
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_HOST, value_name = "URL")]
    pub ollama_host: String,

    /// Deepest folder level shown in the tree given to the model.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Entry name to leave out of the folder tree; repeatable, replaces the default `.git`.
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Hash this local tarball instead of downloading the release archive.
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,
}

impl Cli {
    /// Converts parsed arguments into a [`GenerateConfig`].
    #[must_use]
    pub fn into_config(self) -> GenerateConfig {
        let mut tree = TreeOptions { max_depth: self.max_depth, ..TreeOptions::default() };
        if !self.ignore.is_empty() {
            tree.ignore = self.ignore;
        }
        GenerateConfig {
            repo_dir: self.repo_dir,
            output: config::with_rb_suffix(&self.output),
            tag: TagRequest::from_arg(&self.tag),
            model: self.model,
            ollama_host: self.ollama_host,
            tree,
            archive: self.archive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use crate::config::TagRequest;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply() {
        let config = Cli::try_parse_from(["brewgen", "-r", "/src/widget"]).unwrap().into_config();
        assert_eq!(config.repo_dir, PathBuf::from("/src/widget"));
        assert_eq!(config.output, PathBuf::from("output.rb"));
        assert_eq!(config.tag, TagRequest::Latest);
        assert_eq!(config.model, "llama3");
        assert_eq!(config.tree.ignore, vec![".git".to_string()]);
    }

    #[test]
    fn all_options() {
        let cli = Cli::try_parse_from([
            "brewgen",
            "--repo-dir",
            "/src/widget",
            "-o",
            "Formula/widget",
            "-t",
            "v1.2.0",
            "-m",
            "codellama",
            "--ollama-host",
            "http://gpu-box:11434",
            "--max-depth",
            "2",
            "--ignore",
            "target",
            "--ignore",
            ".git",
            "--archive",
            "/tmp/widget.tar.gz",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.output, PathBuf::from("Formula/widget.rb"));
        assert_eq!(config.tag, TagRequest::Explicit("v1.2.0".into()));
        assert_eq!(config.model, "codellama");
        assert_eq!(config.ollama_host, "http://gpu-box:11434");
        assert_eq!(config.tree.max_depth, Some(2));
        assert_eq!(config.tree.ignore, vec!["target".to_string(), ".git".to_string()]);
        assert_eq!(config.archive, Some(PathBuf::from("/tmp/widget.tar.gz")));
    }

    #[test]
    fn repo_dir_is_required() {
        let err = Cli::try_parse_from(["brewgen"]).unwrap_err();
        assert!(err.to_string().contains("--repo-dir"));
    }
}
