//! Changelog formatter trait.

use chlog_record::LogRecord;

use super::Plugin;

/// A rendered changelog line and the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// The group name the line is listed under.
    pub group: String,

    /// The rendered line.
    pub line: String,
}

impl FormattedLine {
    /// Creates a new formatted line.
    #[must_use]
    pub fn new(group: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            line: line.into(),
        }
    }
}

/// Renders log records into changelog lines.
pub trait Formatter: Plugin {
    /// Returns the group name for a commit message.
    fn match_group(&self, message: &str) -> String;

    /// Formats a record into a line.
    ///
    /// Returns `None` to drop the record from the output.
    fn format(&self, record: &LogRecord) -> Option<FormattedLine>;
}
