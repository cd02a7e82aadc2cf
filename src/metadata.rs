//! Collects everything the prompt needs to know about a repository.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::TagRequest;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::hasher::{self, ContentDigest};
use crate::release;
use crate::remote::{self, HostingProvider, RemoteIdentity};
use crate::tree::{self, TreeOptions};

/// README filename looked up at the repository root.
pub const README_FILE: &str = "README.md";

/// Where the archive digest should come from.
#[derive(Debug, Clone, Copy)]
pub enum ArchiveSource<'a> {
    /// Download the provider's tarball for the resolved tag.
    Remote,
    /// Hash a tarball already on disk.
    Local(&'a Path),
}

/// Everything gathered about the repository, fully built before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBundle {
    /// Raw `.git/config` text.
    pub git_config: Option<String>,
    /// Owner and name parsed from the origin remote.
    pub remote: Option<RemoteIdentity>,
    /// README contents.
    pub readme: Option<String>,
    /// Rendered folder tree.
    pub folder_tree: String,
    /// Release the formula targets.
    pub release_tag: Option<String>,
    /// SHA-256 of the release tarball.
    pub archive_digest: Option<ContentDigest>,
}

/// Gathers a [`MetadataBundle`] for `repo_dir`.
///
/// The config, README and tree are collected independently; a failure in one
/// leaves only that field empty. Tag and digest depend on the remote
/// identity, and the digest on the tag; when a prerequisite is missing the
/// dependent fields stay `None`.
///
/// # Errors
///
/// Fails only when hashing the archive fails: a non-success download, a
/// transport error, or a missing local archive.
pub async fn collect(
    ctx: &ServiceContext,
    provider: &HostingProvider,
    repo_dir: &Path,
    tag: &TagRequest,
    tree_options: &TreeOptions,
    archive: ArchiveSource<'_>,
) -> Result<MetadataBundle> {
    let console = ctx.console.as_ref();

    let git_config = remote::read_git_config(ctx.fs.as_ref(), console, repo_dir);
    let identity = git_config
        .as_deref()
        .and_then(|text| remote::identity_from_config(text, provider, console));

    let readme = read_readme(ctx, repo_dir);

    let folder_tree = match tree::render_tree(ctx.fs.as_ref(), repo_dir, tree_options) {
        Ok(tree) => tree,
        Err(e) => {
            console.error(&format!("Could not list {}: {e}", repo_dir.display()));
            ".".to_string()
        }
    };

    let release_tag = match tag {
        TagRequest::Explicit(tag) => Some(tag.clone()),
        TagRequest::Latest => match &identity {
            Some(id) => release::latest_release_tag(ctx.http.as_ref(), console, provider, id).await,
            None => None,
        },
    };

    let archive_digest = match archive {
        ArchiveSource::Local(path) => Some(hasher::digest_file(ctx.fs.as_ref(), path)?),
        ArchiveSource::Remote => match (&identity, &release_tag) {
            (Some(id), Some(tag)) => {
                let url = provider.archive_url(id, tag);
                Some(hasher::digest_url(ctx.http.as_ref(), &url).await?)
            }
            (None, _) => {
                console.warn("Skipping archive checksum: origin remote unknown.");
                None
            }
            (Some(_), None) => {
                console.warn("Skipping archive checksum: no release tag; pass --tag to pick one.");
                None
            }
        },
    };

    Ok(MetadataBundle { git_config, remote: identity, readme, folder_tree, release_tag, archive_digest })
}

/// Best-effort README read; absence is expected for some repositories.
fn read_readme(ctx: &ServiceContext, repo_dir: &Path) -> Option<String> {
    let path = repo_dir.join(README_FILE);
    if !ctx.fs.exists(&path) {
        tracing::info!(path = %path.display(), "no README");
        return None;
    }
    match ctx.fs.read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            ctx.console.warn(&format!("Could not read {}: {e}", path.display()));
            None
        }
    }
}
