//! The formula-generation pipeline.

use std::path::PathBuf;

use crate::config::GenerateConfig;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::formula;
use crate::metadata::{self, ArchiveSource};
use crate::ports::CompletionRequest;
use crate::prompt;
use crate::remote::HostingProvider;

/// Collects repository metadata, asks the model for a formula, and writes it
/// to `config.output`.
///
/// Nothing is written when the reply holds no ```` ```ruby ```` block.
///
/// # Errors
///
/// Returns an error if archive hashing, the model call, formula extraction,
/// or the file write fails.
pub async fn run(
    ctx: &ServiceContext,
    provider: &HostingProvider,
    config: &GenerateConfig,
) -> Result<PathBuf> {
    let console = ctx.console.as_ref();

    let archive = match &config.archive {
        Some(path) => ArchiveSource::Local(path),
        None => ArchiveSource::Remote,
    };
    let bundle =
        metadata::collect(ctx, provider, &config.repo_dir, &config.tag, &config.tree, archive).await?;

    let request =
        CompletionRequest { model: config.model.clone(), prompt: prompt::render_prompt(&bundle, provider) };
    tracing::debug!(model = %request.model, prompt_chars = request.prompt.len(), "prompt rendered");

    console.status("Generating formula with LLM...");
    let response = ctx.llm.complete(&request).await.map_err(|e| Error::Llm(e.to_string()))?;

    let Some(formula) = formula::extract_formula(&response.text) else {
        console.error("Ruby formula block not found.");
        tracing::debug!(reply = %response.text, "unusable model reply");
        return Err(Error::Extraction);
    };
    console.success("Formula generation complete!");

    let repo_name = bundle.remote.as_ref().map_or("repository", |id| id.name.as_str());
    console.panel(&format!("Ruby Formula for {repo_name}"), "LLM Powered Homebrew Generator", formula);

    ctx.fs.write(&config.output, formula).map_err(|e| Error::Io {
        context: format!("failed to write {}", config.output.display()),
        source: std::io::Error::other(e),
    })?;

    let saved = std::path::absolute(&config.output).unwrap_or_else(|_| config.output.clone());
    console.warn("Please double-check the generated formula; LLMs can make subtle mistakes.");
    console.info(&format!("Output saved to: {}", saved.display()));
    Ok(saved)
}
