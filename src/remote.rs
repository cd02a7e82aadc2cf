//! Git remote parsing: from `.git/config` to an owner/repository pair.
//!
//! The config file is read through the filesystem port and parsed as git's
//! INI dialect. The `url` of `[remote "origin"]` is then matched against the
//! URL templates of a [`HostingProvider`]. Every failure here degrades to
//! `None` with a console diagnostic; nothing in this module is fatal.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ports::{Console, FileSystem};

/// Location of the git config relative to the repository root.
pub const GIT_CONFIG_PATH: [&str; 2] = [".git", "config"];

/// Owner and repository name derived from the origin URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    /// Account or organisation that owns the repository.
    pub owner: String,
    /// Repository name, without any `.git` suffix.
    pub name: String,
}

impl fmt::Display for RemoteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The URL shapes a provider's clone URLs come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlTemplate {
    /// `https://<host>/<owner>/<repo>[.git]`
    Https,
    /// `git@<host>:<owner>/<repo>[.git]`
    Ssh,
}

impl UrlTemplate {
    fn prefix(self, host: &str) -> String {
        match self {
            Self::Https => format!("https://{host}/"),
            Self::Ssh => format!("git@{host}:"),
        }
    }
}

/// A code-hosting service: how its clone URLs look and where its release
/// API and source archives live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingProvider {
    /// Host name in clone URLs, e.g. `github.com`.
    pub host: String,
    /// Clone URL shapes this provider recognizes.
    pub templates: Vec<UrlTemplate>,
    /// Base of the REST API, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Base of the web UI and archive downloads, e.g. `https://github.com`.
    pub web_base: String,
}

impl HostingProvider {
    /// GitHub, the only provider currently known.
    #[must_use]
    pub fn github() -> Self {
        Self {
            host: "github.com".into(),
            templates: vec![UrlTemplate::Https, UrlTemplate::Ssh],
            api_base: "https://api.github.com".into(),
            web_base: "https://github.com".into(),
        }
    }

    /// Same URL matching, but API and archive requests go to `base`.
    ///
    /// Used to point the pipeline at a local stub server.
    #[must_use]
    pub fn with_endpoints(mut self, api_base: impl Into<String>, web_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.web_base = web_base.into();
        self
    }

    /// Decomposes a clone URL into owner and repository name.
    ///
    /// Returns `None` unless the URL starts with one of this provider's
    /// templates and continues with exactly `<owner>/<repo>`. A trailing
    /// `.git` (and trailing slash) is dropped; nothing else is validated.
    #[must_use]
    pub fn match_url(&self, url: &str) -> Option<RemoteIdentity> {
        let url = url.trim();
        let rest = self
            .templates
            .iter()
            .find_map(|t| url.strip_prefix(t.prefix(&self.host).as_str()))?;

        let (owner, repo) = rest.split_once('/')?;
        let repo = repo.trim_end_matches('/');
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(RemoteIdentity { owner: owner.to_string(), name: repo.to_string() })
    }

    /// Project homepage.
    #[must_use]
    pub fn homepage(&self, id: &RemoteIdentity) -> String {
        format!("{}/{}/{}", self.web_base, id.owner, id.name)
    }

    /// REST endpoint describing the latest published release.
    #[must_use]
    pub fn latest_release_url(&self, id: &RemoteIdentity) -> String {
        format!("{}/repos/{}/{}/releases/latest", self.api_base, id.owner, id.name)
    }

    /// Source tarball for `tag`.
    #[must_use]
    pub fn archive_url(&self, id: &RemoteIdentity, tag: &str) -> String {
        format!("{}/{}/{}/archive/refs/tags/{tag}.tar.gz", self.web_base, id.owner, id.name)
    }
}

impl Default for HostingProvider {
    fn default() -> Self {
        Self::github()
    }
}

/// One `[section "subsection"]` block of a git config file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    /// Lower-cased section name.
    name: String,
    subsection: Option<String>,
    entries: Vec<(String, String)>,
}

/// Parsed git config. Section names and keys compare case-insensitively,
/// subsection names case-sensitively, as git does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    sections: Vec<Section>,
}

impl GitConfig {
    /// Parses config text. Lines that are neither headers nor `key = value`
    /// pairs are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let (name, subsection) = match header.split_once(char::is_whitespace) {
                    Some((name, sub)) => (name, Some(unquote(sub.trim()).to_string())),
                    None => (header, None),
                };
                sections.push(Section {
                    name: name.trim().to_ascii_lowercase(),
                    subsection,
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(section) = sections.last_mut() else { continue };
            let (key, value) = match line.split_once('=') {
                Some((k, v)) => (k.trim(), unquote(v.trim())),
                // A bare key is boolean true in git's dialect.
                None => (line, "true"),
            };
            section.entries.push((key.to_ascii_lowercase(), value.to_string()));
        }

        Self { sections }
    }

    /// Value of `key` in `[section "subsection"]`; the last occurrence wins.
    #[must_use]
    pub fn get(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| s.name.eq_ignore_ascii_case(section) && s.subsection.as_deref() == subsection)
            .flat_map(|s| s.entries.iter())
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .last()
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Path of the git config for `repo_dir`.
#[must_use]
pub fn git_config_path(repo_dir: &Path) -> PathBuf {
    GIT_CONFIG_PATH.iter().fold(repo_dir.to_path_buf(), |p, part| p.join(part))
}

/// Reads the raw git config text, reporting a missing file on the console.
pub fn read_git_config(fs: &dyn FileSystem, console: &dyn Console, repo_dir: &Path) -> Option<String> {
    let path = git_config_path(repo_dir);
    if !fs.exists(&path) {
        console.error(&format!("File not found: {}", path.display()));
        return None;
    }
    match fs.read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            console.error(&format!("Could not read {}: {e}", path.display()));
            None
        }
    }
}

/// Derives the origin identity from already-read config text.
pub fn identity_from_config(
    text: &str,
    provider: &HostingProvider,
    console: &dyn Console,
) -> Option<RemoteIdentity> {
    let config = GitConfig::parse(text);
    let Some(url) = config.get("remote", Some("origin"), "url") else {
        console.error("Could not find 'origin' remote in git config.");
        return None;
    };

    let identity = provider.match_url(url);
    match &identity {
        Some(id) => tracing::debug!(url, %id, "origin remote parsed"),
        None => console.error(&format!("Could not parse {} owner/repo from URL: {url}", provider.host)),
    }
    identity
}

/// Reads `<repo_dir>/.git/config` and derives the origin identity.
pub fn parse_remote(
    fs: &dyn FileSystem,
    console: &dyn Console,
    provider: &HostingProvider,
    repo_dir: &Path,
) -> Option<RemoteIdentity> {
    let text = read_git_config(fs, console, repo_dir)?;
    identity_from_config(&text, provider, console)
}
