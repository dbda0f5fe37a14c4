//! Line parser trait.

use chlog_record::LogRecord;

/// Turns one raw `git log` line into a [`LogRecord`].
///
/// The line has already been trimmed of surrounding whitespace and quote
/// characters by the caller.
pub trait LineParser: Send + Sync {
    /// Parses a single line.
    ///
    /// Returns `None` if the line does not have the expected layout; the
    /// caller skips it instead of failing the whole run.
    fn parse(&self, line: &str) -> Option<LogRecord>;
}

impl<F> LineParser for F
where
    F: Fn(&str) -> Option<LogRecord> + Send + Sync,
{
    fn parse(&self, line: &str) -> Option<LogRecord> {
        self(line)
    }
}
