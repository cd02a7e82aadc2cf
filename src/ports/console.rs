//! Console port: the user-facing output sink.

/// Receives human-readable progress and diagnostics.
///
/// Every component reports through an explicitly passed console rather than
/// printing directly, so output can be captured in tests.
pub trait Console: Send + Sync {
    /// Plain informational line.
    fn info(&self, message: &str);

    /// Completion of a step.
    fn success(&self, message: &str);

    /// Something the user should double-check.
    fn warn(&self, message: &str);

    /// A failure that was reported but not necessarily fatal.
    fn error(&self, message: &str);

    /// Announces a long-running step.
    fn status(&self, message: &str);

    /// Shows `body` framed with a title and subtitle.
    fn panel(&self, title: &str, subtitle: &str, body: &str);
}
