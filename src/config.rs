//! Resolved settings for one formula-generation run.

use std::path::{Path, PathBuf};

use crate::tree::TreeOptions;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "output.rb";
/// Sentinel tag value that asks for the latest published release.
pub const LATEST_TAG: &str = "latest";
/// Default Ollama model.
pub const DEFAULT_MODEL: &str = "llama3";

/// Which release tag to build the formula for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagRequest {
    /// Resolve the latest published release.
    #[default]
    Latest,
    /// Use this tag verbatim.
    Explicit(String),
}

impl TagRequest {
    /// Interprets a command-line tag value; `latest` is the sentinel.
    #[must_use]
    pub fn from_arg(tag: &str) -> Self {
        if tag == LATEST_TAG {
            Self::Latest
        } else {
            Self::Explicit(tag.to_string())
        }
    }
}

/// Everything the `generate` pipeline needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Root of the cloned repository.
    pub repo_dir: PathBuf,
    /// Where the formula is written; always ends in `.rb`.
    pub output: PathBuf,
    /// Release tag selection.
    pub tag: TagRequest,
    /// Model name passed to Ollama.
    pub model: String,
    /// Base URL of the Ollama server.
    pub ollama_host: String,
    /// Folder-tree options.
    pub tree: TreeOptions,
    /// Local release tarball to hash instead of downloading one.
    pub archive: Option<PathBuf>,
}

impl GenerateConfig {
    /// Config with defaults for everything but the repository.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            tag: TagRequest::Latest,
            model: DEFAULT_MODEL.to_string(),
            ollama_host: crate::adapters::live::llm::DEFAULT_OLLAMA_HOST.to_string(),
            tree: TreeOptions::default(),
            archive: None,
        }
    }
}

/// Appends `.rb` unless the path already ends with it.
#[must_use]
pub fn with_rb_suffix(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "rb") {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".rb");
    PathBuf::from(raw)
}
