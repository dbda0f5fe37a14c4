//! Pipe-delimited `git log` line parser plugin.

use chlog_plugin::{LineParser, Plugin};
use chlog_record::{FIELD_SEPARATOR, LogFormat, LogRecord};

/// Splits `git log --pretty` lines produced by one of the [`LogFormat`] layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeParser {
    format: LogFormat,
}

impl PipeParser {
    /// Creates a parser for the given log format.
    #[must_use]
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    /// Returns the log format this parser splits by.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }
}

impl Plugin for PipeParser {
    fn name(&self) -> &'static str {
        "pipe"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Parses ' | ' separated git log lines"
    }
}

impl LineParser for PipeParser {
    fn parse(&self, line: &str) -> Option<LogRecord> {
        let count = self.format.field_count();
        let fields: Vec<&str> = line.splitn(count, FIELD_SEPARATOR).collect();
        if fields.len() != count || fields[1].is_empty() {
            return None;
        }

        let builder = LogRecord::builder(fields[0], fields[1]);
        let record = match self.format {
            LogFormat::HashSubject => builder.build(),
            LogFormat::HashSubjectAuthor => builder.author(fields[2]).build(),
            LogFormat::HashSubjectCommitter => builder.committer(fields[2]).build(),
            LogFormat::HashSubjectAuthorDate | LogFormat::HashSubjectCommitDate => {
                builder.date(fields[2]).build()
            }
        };

        Some(record)
    }
}
