//! Text formatter plugins.
//!
//! Three styles are provided, each built on the previous one:
//! - [`PlainFormatter`]: ` - abc1234 message by(user)`
//! - [`MarkdownFormatter`]: `- message [abc1234](<repo>/commit/<hash>) by(user)`
//! - [`ReleaseNoteFormatter`]: `- message <repo>/commit/<hash> by(@user)`

use std::fmt::Write;

use chlog_plugin::{FormattedLine, Formatter, GroupMatcher, Plugin};
use chlog_record::LogRecord;

/// Appends ` by(<user>)` when the record has a username.
fn push_username(line: &mut String, record: &LogRecord, mention: bool) {
    let user = record.username();
    if user.is_empty() {
        return;
    }

    let at = if mention { "@" } else { "" };
    _ = write!(line, " by({at}{user})");
}

/// Plain text formatter.
pub struct PlainFormatter {
    matcher: Box<dyn GroupMatcher>,
}

impl PlainFormatter {
    /// Creates a formatter grouping records with the given matcher.
    #[must_use]
    pub fn new(matcher: impl GroupMatcher + 'static) -> Self {
        Self::from_boxed(Box::new(matcher))
    }

    /// Creates a formatter from an already boxed matcher.
    #[must_use]
    pub fn from_boxed(matcher: Box<dyn GroupMatcher>) -> Self {
        Self { matcher }
    }

    fn render(record: &LogRecord) -> String {
        let mut line = String::from(" - ");
        if !record.hash_id().is_empty() {
            _ = write!(line, "{} ", record.abbrev_id());
        }
        line.push_str(record.message());
        push_username(&mut line, record, false);
        line
    }
}

impl Plugin for PlainFormatter {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Plain text changelog lines"
    }
}

impl Formatter for PlainFormatter {
    fn match_group(&self, message: &str) -> String {
        self.matcher.match_group(message)
    }

    fn format(&self, record: &LogRecord) -> Option<FormattedLine> {
        Some(FormattedLine::new(
            self.match_group(record.message()),
            Self::render(record),
        ))
    }
}

/// Markdown formatter with commit links.
///
/// The repository URL is not validated; an empty one yields relative links.
pub struct MarkdownFormatter {
    plain: PlainFormatter,
    repo_url: String,
}

impl MarkdownFormatter {
    /// Creates a Markdown formatter.
    #[must_use]
    pub fn new(plain: PlainFormatter, repo_url: impl Into<String>) -> Self {
        let repo_url: String = repo_url.into();
        Self {
            plain,
            repo_url: repo_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the repository URL used for links.
    #[must_use]
    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    fn commit_url(&self, record: &LogRecord) -> String {
        format!("{}/commit/{}", self.repo_url, record.hash_id())
    }

    fn render(&self, record: &LogRecord) -> String {
        let mut line = if record.hash_id().is_empty() {
            format!(" - {}", record.message())
        } else {
            format!(
                "- {} [{}]({})",
                record.message(),
                record.abbrev_id(),
                self.commit_url(record)
            )
        };
        push_username(&mut line, record, false);
        line
    }
}

impl Plugin for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Markdown changelog lines with commit links"
    }
}

impl Formatter for MarkdownFormatter {
    fn match_group(&self, message: &str) -> String {
        self.plain.match_group(message)
    }

    fn format(&self, record: &LogRecord) -> Option<FormattedLine> {
        Some(FormattedLine::new(
            self.match_group(record.message()),
            self.render(record),
        ))
    }
}

/// GitHub release note formatter.
///
/// Renders bare commit URLs and `@` mentions so GitHub expands them.
pub struct ReleaseNoteFormatter {
    markdown: MarkdownFormatter,
}

impl ReleaseNoteFormatter {
    /// Creates a release note formatter.
    #[must_use]
    pub fn new(markdown: MarkdownFormatter) -> Self {
        Self { markdown }
    }

    fn render(&self, record: &LogRecord) -> String {
        let mut line = if record.hash_id().is_empty() {
            format!(" - {}", record.message())
        } else {
            format!("- {} {}", record.message(), self.markdown.commit_url(record))
        };
        push_username(&mut line, record, true);
        line
    }
}

impl Plugin for ReleaseNoteFormatter {
    fn name(&self) -> &'static str {
        "ghr"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "GitHub release notes with commit URLs and mentions"
    }
}

impl Formatter for ReleaseNoteFormatter {
    fn match_group(&self, message: &str) -> String {
        self.markdown.match_group(message)
    }

    fn format(&self, record: &LogRecord) -> Option<FormattedLine> {
        Some(FormattedLine::new(
            self.match_group(record.message()),
            self.render(record),
        ))
    }
}
