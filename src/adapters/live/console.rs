//! Live console adapter writing to the terminal.

use crate::ports::console::Console;

/// Prints progress to stdout and diagnostics to stderr.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn success(&self, message: &str) {
        println!("✔ {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn status(&self, message: &str) {
        println!("… {message}");
    }

    fn panel(&self, title: &str, subtitle: &str, body: &str) {
        println!("{}", render_panel(title, subtitle, body));
    }
}

/// Frames `body` in a box-drawing border with the title on the top edge and
/// the subtitle on the bottom edge.
#[must_use]
pub fn render_panel(title: &str, subtitle: &str, body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([title.chars().count() + 2, subtitle.chars().count() + 2])
        .max()
        .unwrap_or(0);
    let inner = content_width + 2;

    let mut out = String::new();
    out.push_str(&edge('╭', '╮', title, inner));
    out.push('\n');
    for line in &lines {
        let pad = content_width - line.chars().count();
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&edge('╰', '╯', subtitle, inner));
    out
}

fn edge(left: char, right: char, label: &str, inner: usize) -> String {
    let label = format!(" {label} ");
    let fill = inner - label.chars().count();
    let before = fill / 2;
    format!("{left}{}{label}{}{right}", "─".repeat(before), "─".repeat(fill - before))
}

#[cfg(test)]
mod tests {
    use super::render_panel;

    #[test]
    fn panel_lines_share_one_width() {
        let panel = render_panel("Ruby Formula for widget", "sub", "class Widget < Formula\nend");
        let widths: Vec<usize> = panel.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(panel.contains("Ruby Formula for widget"));
        assert!(panel.contains("│ end"));
    }
}
