//! Renders a [`MetadataBundle`] into the formula-generation prompt.

use crate::formula::class_name;
use crate::metadata::MetadataBundle;
use crate::remote::HostingProvider;

const UNKNOWN: &str = "<unknown>";
const NO_README: &str = "<no README found>";

/// Builds the prompt asking the model for a Homebrew formula.
#[must_use]
pub fn render_prompt(bundle: &MetadataBundle, provider: &HostingProvider) -> String {
    let homepage = bundle.remote.as_ref().map_or_else(|| UNKNOWN.to_string(), |id| provider.homepage(id));
    let tarball = match (&bundle.remote, &bundle.release_tag) {
        (Some(id), Some(tag)) => provider.archive_url(id, tag),
        _ => UNKNOWN.to_string(),
    };
    let sha256 = bundle.archive_digest.as_ref().map_or(UNKNOWN, |d| d.as_str());
    let readme = bundle.readme.as_deref().unwrap_or(NO_README);
    let git_config = bundle.git_config.as_deref().unwrap_or(UNKNOWN);

    let mut prompt = format!(
        "\
I have a command-line tool that I want to distribute via Homebrew.

Please generate a valid Ruby formula for Homebrew using the information below:

Folder Tree:
{tree}

- **Tool name**: <fill_it_in>
- **Description**:
___
{readme}
___
- **Homepage**: {homepage}
- **Source tarball URL**: {tarball}
- **SHA256**: {sha256}
- **License**: <fill_it_in>
- **Language/Dependencies**: <fill_it_in>
- **Install command**: <fill_it_in>
- **Test command**: <fill_it_in>

The .git/config file looks like:
____
{git_config}
____

Notes:
- The CLI tool is defined in the repo as a single executable script or binary.
- Please use idiomatic Homebrew formula formatting and indentation.
- Return only the Ruby formula, inside a ```ruby fenced code block.
",
        tree = bundle.folder_tree,
    );

    if let Some(id) = &bundle.remote {
        prompt.push_str(&format!("\nThe formula class name should be `{}`.\n", class_name(&id.name)));
    }
    prompt
}
