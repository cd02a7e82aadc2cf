//! Pulling the Ruby formula out of a model reply.

const FENCE_OPEN: &str = "```ruby\n";
const FENCE_CLOSE: &str = "\n```";

/// Body of the first ```` ```ruby ```` fenced block, trimmed.
///
/// Returns `None` when there is no complete block or the block is blank.
#[must_use]
pub fn extract_formula(response: &str) -> Option<&str> {
    let start = response.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &response[start..];
    let end = rest.find(FENCE_CLOSE)?;
    let body = rest[..end].trim();
    (!body.is_empty()).then_some(body)
}

/// Homebrew class name for a repository: `widget-cli` becomes `WidgetCli`.
#[must_use]
pub fn class_name(repo: &str) -> String {
    repo.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_ruby_block() {
        let reply = "Here you go:\n\n```ruby\nclass Widget < Formula\n  desc \"Widgets\"\nend\n```\n\nAnd another:\n```ruby\nputs 1\n```\n";
        assert_eq!(extract_formula(reply), Some("class Widget < Formula\n  desc \"Widgets\"\nend"));
    }

    #[test]
    fn missing_or_unterminated_block_is_none() {
        assert_eq!(extract_formula("class Widget < Formula\nend"), None);
        assert_eq!(extract_formula("```python\nprint(1)\n```"), None);
        assert_eq!(extract_formula("```ruby\nclass Widget < Formula"), None);
        assert_eq!(extract_formula("```ruby\n   \n```"), None);
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name("widget"), "Widget");
        assert_eq!(class_name("widget-cli"), "WidgetCli");
        assert_eq!(class_name("my_tool.rs"), "MyToolRs");
        assert_eq!(class_name("git2go"), "Git2go");
    }
}
