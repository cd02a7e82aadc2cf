//! In-memory console that keeps every line for later inspection.

use std::sync::{Arc, Mutex};

use crate::ports::console::Console;

/// Console adapter that captures output instead of printing it.
///
/// Clones share the same buffer, so a test can hand one clone to a
/// `ServiceContext` and read the lines back through another.
#[derive(Debug, Clone, Default)]
pub struct CapturingConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingConsole {
    /// Creates an empty capturing console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every captured line, prefixed with its level.
    ///
    /// # Panics
    ///
    /// Panics if the buffer lock was poisoned.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("console lock poisoned").clone()
    }

    /// Returns `true` if any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    fn push(&self, level: &str, message: &str) {
        self.lines.lock().expect("console lock poisoned").push(format!("[{level}] {message}"));
    }
}

impl Console for CapturingConsole {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn status(&self, message: &str) {
        self.push("status", message);
    }

    fn panel(&self, title: &str, subtitle: &str, body: &str) {
        self.push("panel", &format!("{title} | {subtitle}\n{body}"));
    }
}
