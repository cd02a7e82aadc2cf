//! `tree`-style rendering of a repository's folder structure.

use std::path::Path;

use crate::ports::{DirEntry, FileSystem, PortError};

/// Directory names skipped when no ignore list is given.
pub const DEFAULT_IGNORE: &[&str] = &[".git"];

/// Controls which entries the folder tree includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Deepest level to include; the repository's direct children are level 1.
    pub max_depth: Option<usize>,
    /// Entry names that are skipped along with everything beneath them.
    pub ignore: Vec<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { max_depth: None, ignore: DEFAULT_IGNORE.iter().map(ToString::to_string).collect() }
    }
}

impl TreeOptions {
    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|i| i == name)
    }
}

/// Renders the tree below `root`.
///
/// The first line is `.`; each entry follows on its own line, indented four
/// spaces per level below the first and prefixed with `└── `. Siblings are
/// sorted by name and every directory's contents follow it directly, so the
/// output is the listing sorted by full path. Symlinks appear as leaves and
/// are never followed.
///
/// # Errors
///
/// Returns an error only if `root` itself cannot be listed. Unreadable
/// subdirectories are logged and rendered without children.
pub fn render_tree(fs: &dyn FileSystem, root: &Path, options: &TreeOptions) -> Result<String, PortError> {
    let mut lines = vec![".".to_string()];
    let entries = fs.list_dir(root)?;
    walk(fs, root, entries, 1, options, &mut lines);
    tracing::debug!(root = %root.display(), entries = lines.len() - 1, "folder tree built");
    Ok(lines.join("\n"))
}

fn walk(
    fs: &dyn FileSystem,
    dir: &Path,
    mut entries: Vec<DirEntry>,
    depth: usize,
    options: &TreeOptions,
    lines: &mut Vec<String>,
) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if options.max_depth.is_some_and(|max| depth > max) {
        return;
    }
    for entry in entries {
        if options.is_ignored(&entry.name) {
            continue;
        }
        lines.push(format!("{}└── {}", "    ".repeat(depth - 1), entry.name));

        if !entry.is_dir || options.max_depth == Some(depth) {
            continue;
        }
        let path = dir.join(&entry.name);
        match fs.list_dir(&path) {
            Ok(children) => walk(fs, &path, children, depth + 1, options, lines),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    fn sample_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for d in [".git/objects", "src/cli", "docs"] {
            std::fs::create_dir_all(root.join(d)).unwrap();
        }
        for f in [".git/config", ".git/objects/ab", "src/main.rs", "src/cli/args.rs", "README.md", "Cargo.toml"] {
            std::fs::write(root.join(f), "x").unwrap();
        }
        dir
    }

    #[test]
    fn renders_sorted_tree_without_git_dir() {
        let repo = sample_repo();
        let tree = render_tree(&LiveFileSystem, repo.path(), &TreeOptions::default()).unwrap();
        let expected = [
            ".",
            "└── Cargo.toml",
            "└── README.md",
            "└── docs",
            "└── src",
            "    └── cli",
            "        └── args.rs",
            "    └── main.rs",
        ]
        .join("\n");
        assert_eq!(tree, expected);
        assert!(!tree.contains("objects"));
        assert!(!tree.contains(".git"));
    }

    #[test]
    fn repeated_renders_are_identical() {
        let repo = sample_repo();
        let first = render_tree(&LiveFileSystem, repo.path(), &TreeOptions::default()).unwrap();
        let second = render_tree(&LiveFileSystem, repo.path(), &TreeOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn max_depth_bounds_the_walk() {
        let repo = sample_repo();
        let options = TreeOptions { max_depth: Some(1), ..TreeOptions::default() };
        let tree = render_tree(&LiveFileSystem, repo.path(), &options).unwrap();
        assert!(tree.contains("└── src"));
        assert!(!tree.contains("main.rs"));
        assert_eq!(tree.lines().count(), 5);
    }

    #[test]
    fn zero_depth_lists_only_the_root() {
        let repo = sample_repo();
        let options = TreeOptions { max_depth: Some(0), ..TreeOptions::default() };
        let tree = render_tree(&LiveFileSystem, repo.path(), &options).unwrap();
        assert_eq!(tree, ".");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_leaves() {
        let repo = sample_repo();
        std::os::unix::fs::symlink(repo.path().join("src"), repo.path().join("link")).unwrap();
        std::os::unix::fs::symlink(repo.path(), repo.path().join("loop")).unwrap();

        let tree = render_tree(&LiveFileSystem, repo.path(), &TreeOptions::default()).unwrap();
        let expected = [
            ".",
            "└── Cargo.toml",
            "└── README.md",
            "└── docs",
            "└── link",
            "└── loop",
            "└── src",
            "    └── cli",
            "        └── args.rs",
            "    └── main.rs",
        ]
        .join("\n");
        assert_eq!(tree, expected);
    }

    #[test]
    fn custom_ignore_replaces_default() {
        let repo = sample_repo();
        let options = TreeOptions { max_depth: Some(1), ignore: vec!["docs".into()] };
        let tree = render_tree(&LiveFileSystem, repo.path(), &options).unwrap();
        assert!(tree.contains("└── .git"));
        assert!(!tree.contains("docs"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(render_tree(&LiveFileSystem, &dir.path().join("gone"), &TreeOptions::default()).is_err());
    }
}
