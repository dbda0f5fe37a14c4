//! Changelog engine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{self, Write};

use chlog_config::ChangelogConfig;
use chlog_plugin::{DEFAULT_GROUP, FormattedLine, Formatter, ItemFilter, LineParser, LogSource};
use chlog_record::LogRecord;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::factory::{create_filters, create_formatter, create_parser};
use crate::{CoreError, CoreResult};

/// Quote characters that may enclose a whole log line.
const LINE_QUOTES: [char; 2] = ['"', '\''];

/// Progress of a [`Changelog`].
///
/// Transitions only go forward: `Empty -> Parsed -> Generated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Nothing has run yet.
    #[default]
    Empty,
    /// Records have been parsed, or parsing failed.
    Parsed,
    /// The changelog text has been assembled.
    Generated,
}

/// Builds a changelog from raw `git log` text.
///
/// Each instance parses and generates at most once; later calls return the
/// cached outcome. Create a new instance to render different input.
pub struct Changelog {
    config: ChangelogConfig,
    state: State,
    log_text: String,
    parser: Option<Box<dyn LineParser>>,
    filters: Vec<Box<dyn ItemFilter>>,
    formatter: Option<Box<dyn Formatter>>,
    records: Vec<LogRecord>,
    formatted: HashMap<String, Vec<String>>,
    log_count: usize,
    changelog: String,
    error: Option<CoreError>,
}

impl Changelog {
    /// Creates an empty changelog with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ChangelogConfig::default())
    }

    /// Creates an empty changelog with the given configuration.
    #[must_use]
    pub fn with_config(config: ChangelogConfig) -> Self {
        Self {
            config,
            state: State::Empty,
            log_text: String::new(),
            parser: None,
            filters: Vec::new(),
            formatter: None,
            records: Vec::new(),
            formatted: HashMap::new(),
            log_count: 0,
            changelog: String::new(),
            error: None,
        }
    }

    /// Adjusts the configuration in place.
    #[must_use]
    pub fn with_config_fn(mut self, f: impl FnOnce(&mut ChangelogConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// Sets the raw log text.
    #[must_use]
    pub fn with_log_text(mut self, text: impl Into<String>) -> Self {
        self.set_log_text(text);
        self
    }

    /// Sets the raw log text. Has no effect once parsing has run.
    pub fn set_log_text(&mut self, text: impl Into<String>) {
        self.log_text = text.into();
    }

    /// Replaces the built-in line parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl LineParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds an item filter, run before the configured filters.
    #[must_use]
    pub fn with_filter(mut self, filter: impl ItemFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Replaces the formatter selected by the configured style.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Fetches the log text for `from...to` from a log source.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Source`] if the source fails.
    pub fn fetch_from(
        &mut self,
        source: &dyn LogSource,
        from: &str,
        to: &str,
        extra_args: &[String],
    ) -> CoreResult<()> {
        info!(from, to, "fetching git log");
        let text = source
            .fetch(from, to, extra_args)
            .map_err(|e| CoreError::Source(e.to_string()))?;
        debug!(bytes = text.len(), "git log fetched");
        self.set_log_text(text);
        Ok(())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the accepted records in input order.
    #[must_use]
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Returns the number of rendered lines.
    #[must_use]
    pub fn log_count(&self) -> usize {
        self.log_count
    }

    /// Returns the assembled changelog, empty before [`generate`](Self::generate).
    #[must_use]
    pub fn changelog(&self) -> &str {
        &self.changelog
    }

    /// Writes the assembled changelog to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(self.changelog.as_bytes())?;
        Ok(self.changelog.len())
    }

    /// Parses the log text into records.
    ///
    /// Runs at most once. Malformed lines, filtered records and repeated
    /// messages are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyInput`] if the log text is blank, or
    /// [`CoreError::UnsupportedLogFormat`] if the built-in parser cannot be
    /// created for the configured log format.
    pub fn parse(&mut self) -> CoreResult<()> {
        if self.state != State::Empty {
            return self.error.clone().map_or(Ok(()), Err);
        }

        self.state = State::Parsed;
        let result = self.parse_records();
        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }

    fn parse_records(&mut self) -> CoreResult<()> {
        let text = self.log_text.trim();
        if text.is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let builtin;
        let parser: &dyn LineParser = match &self.parser {
            Some(parser) => parser.as_ref(),
            None => {
                builtin = create_parser(&self.config)?;
                &builtin
            }
        };
        let config_filters = create_filters(&self.config);
        let remove_repeats = self.config.remove_repeats;

        let mut seen = HashSet::new();
        let (mut lines, mut rejected, mut filtered, mut repeated) = (0usize, 0usize, 0usize, 0usize);

        for line in text.lines() {
            let line = unquote_line(line);
            if line.is_empty() {
                continue;
            }
            lines += 1;

            let Some(record) = parser.parse(line) else {
                rejected += 1;
                continue;
            };

            if !self
                .filters
                .iter()
                .chain(config_filters.iter())
                .all(|filter| filter.accept(&record))
            {
                filtered += 1;
                continue;
            }

            if remove_repeats && !seen.insert(message_digest(record.message())) {
                repeated += 1;
                continue;
            }

            self.records.push(record);
        }

        debug!(
            lines,
            rejected,
            filtered,
            repeated,
            kept = self.records.len(),
            "git log parsed"
        );

        Ok(())
    }

    /// Formats the records and assembles the changelog text.
    ///
    /// Runs [`parse`](Self::parse) first and at most once overall. Sections are
    /// joined with `\n`; the text has no trailing newline.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`parse`](Self::parse).
    pub fn generate(&mut self) -> CoreResult<()> {
        if self.state == State::Generated {
            return Ok(());
        }
        self.parse()?;

        self.format_records();
        self.changelog = self.assemble();
        self.state = State::Generated;

        info!(
            records = self.records.len(),
            lines = self.log_count,
            "changelog generated"
        );
        Ok(())
    }

    fn format_records(&mut self) {
        let builtin;
        let formatter: &dyn Formatter = match &self.formatter {
            Some(formatter) => formatter.as_ref(),
            None => {
                builtin = create_formatter(&self.config);
                builtin.as_ref()
            }
        };

        for record in &self.records {
            let Some(FormattedLine { group, line }) = formatter.format(record) else {
                continue;
            };
            if line.is_empty() {
                continue;
            }

            let group = if group.is_empty() {
                DEFAULT_GROUP.to_string()
            } else {
                group
            };
            self.formatted.entry(group).or_default().push(line);
            self.log_count += 1;
        }

        debug!(groups = self.formatted.len(), "records formatted");
    }

    fn assemble(&self) -> String {
        let names = self.config.group_names();

        for (group, lines) in &self.formatted {
            if !names.contains(group) {
                warn!(group = %group, lines = lines.len(), "group is not in the configured order, skipped");
            }
        }

        let mut seen = HashSet::new();
        let groups: Vec<(&str, &Vec<String>)> = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .filter_map(|name| {
                self.formatted
                    .get(name)
                    .filter(|lines| !lines.is_empty())
                    .map(|lines| (name.as_str(), lines))
            })
            .collect();

        // Counts every group with output, including ones left out of the order.
        let with_headings = self.formatted.len() > 1 && !self.config.no_group;
        let mut sections = Vec::with_capacity(groups.len() * 2 + 1);
        if !self.config.title.is_empty() {
            sections.push(self.config.title.clone());
        }

        for (name, lines) in groups {
            if with_headings {
                sections.push(format!(
                    "{}{name}{}",
                    self.config.group_prefix, self.config.group_suffix
                ));
            }
            sections.push(lines.join("\n"));
        }

        sections.join("\n")
    }
}

impl Default for Changelog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.changelog)
    }
}

/// Trims whitespace and one pair of matching enclosing quotes.
fn unquote_line(line: &str) -> &str {
    let line = line.trim();
    let mut chars = line.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && LINE_QUOTES.contains(&first) => {
            line[1..line.len() - 1].trim()
        }
        _ => line,
    }
}

/// Hex SHA-256 of a commit message, used as the dedup key.
fn message_digest(message: &str) -> String {
    format!("{:x}", Sha256::digest(message.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_changelog(text: &str) -> Changelog {
        Changelog::new().with_log_text(text)
    }

    #[test]
    fn test_new_is_empty() {
        let changelog = Changelog::new();
        assert_eq!(changelog.state(), State::Empty);
        assert!(changelog.records().is_empty());
        assert_eq!(changelog.changelog(), "");
        assert_eq!(changelog.log_count(), 0);
    }

    #[test]
    fn test_parse_strips_quotes() {
        let mut changelog = make_changelog("\"abc1234 | fix: quoted\"\n  'def5678 | feat: single'  ");
        changelog.parse().unwrap();

        let messages: Vec<&str> = changelog.records().iter().map(LogRecord::message).collect();
        assert_eq!(messages, vec!["fix: quoted", "feat: single"]);
    }

    #[test]
    fn test_parse_keeps_quotes_inside_message() {
        let mut changelog = make_changelog(
            "abc1234 | Revert \"feat: add x\"\nabc1235 | fix: don't drop 'y'\n\"abc1236 | Revert \"fix: z\"\"",
        );
        changelog.parse().unwrap();

        let messages: Vec<&str> = changelog.records().iter().map(LogRecord::message).collect();
        assert_eq!(
            messages,
            vec!["Revert \"feat: add x\"", "fix: don't drop 'y'", "Revert \"fix: z\""]
        );
    }

    #[test]
    fn test_unquote_line() {
        assert_eq!(unquote_line("  \"a | b\"  "), "a | b");
        assert_eq!(unquote_line("'a | b'"), "a | b");
        assert_eq!(unquote_line("\"a | b'"), "\"a | b'");
        assert_eq!(unquote_line("\""), "\"");
        assert_eq!(unquote_line("\"\""), "");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let mut changelog = make_changelog("garbage\n\nabc1234 | fix: ok\n   \n");
        changelog.parse().unwrap();
        assert_eq!(changelog.records().len(), 1);
    }

    #[test]
    fn test_parse_crlf() {
        let mut changelog = make_changelog("a1 | fix: one\r\na2 | feat: two\r\n");
        changelog.parse().unwrap();
        assert_eq!(changelog.records()[1].message(), "feat: two");
    }

    #[test]
    fn test_state_transitions() {
        let mut changelog = make_changelog("a1 | fix: one");
        changelog.parse().unwrap();
        assert_eq!(changelog.state(), State::Parsed);
        changelog.generate().unwrap();
        assert_eq!(changelog.state(), State::Generated);
    }

    #[test]
    fn test_failed_parse_is_cached() {
        let mut changelog = make_changelog("   ");
        assert_eq!(changelog.parse(), Err(CoreError::EmptyInput));

        changelog.set_log_text("a1 | fix: later");
        assert_eq!(changelog.parse(), Err(CoreError::EmptyInput));
        assert_eq!(changelog.generate(), Err(CoreError::EmptyInput));
        assert_eq!(changelog.state(), State::Parsed);
    }

    #[test]
    fn test_unsupported_log_format() {
        let mut changelog = make_changelog("a1 | fix: one")
            .with_config_fn(|config| config.log_format = "oneline".to_string());
        assert_eq!(
            changelog.generate(),
            Err(CoreError::UnsupportedLogFormat("oneline".to_string()))
        );
    }

    #[test]
    fn test_custom_parser() {
        let mut changelog = make_changelog("fix: a\nfeat: b").with_parser(|line: &str| {
            Some(LogRecord::new("", line))
        });
        changelog.generate().unwrap();
        assert_eq!(changelog.records().len(), 2);
        assert!(changelog.changelog().contains(" - fix: a"));
    }

    #[test]
    fn test_custom_filter_runs_first() {
        let mut changelog = make_changelog("a1 | fix: one\na2 | fix: two")
            .with_filter(|record: &LogRecord| !record.message().ends_with("two"));
        changelog.parse().unwrap();
        assert_eq!(changelog.records().len(), 1);
    }

    #[test]
    fn test_empty_group_becomes_default() {
        struct NoGroup;

        impl chlog_plugin::Plugin for NoGroup {
            fn name(&self) -> &'static str {
                "no-group"
            }

            fn version(&self) -> &'static str {
                "0.0.0"
            }
        }

        impl Formatter for NoGroup {
            fn match_group(&self, _message: &str) -> String {
                String::new()
            }

            fn format(&self, record: &LogRecord) -> Option<FormattedLine> {
                Some(FormattedLine::new("", record.message()))
            }
        }

        let mut changelog = make_changelog("a1 | fix: one")
            .with_config_fn(|config| config.title.clear())
            .with_formatter(Box::new(NoGroup));
        changelog.generate().unwrap();
        assert_eq!(changelog.changelog(), "fix: one");
    }

    #[test]
    fn test_formatter_veto() {
        struct SkipFixes;

        impl chlog_plugin::Plugin for SkipFixes {
            fn name(&self) -> &'static str {
                "skip-fixes"
            }

            fn version(&self) -> &'static str {
                "0.0.0"
            }
        }

        impl Formatter for SkipFixes {
            fn match_group(&self, _message: &str) -> String {
                DEFAULT_GROUP.to_string()
            }

            fn format(&self, record: &LogRecord) -> Option<FormattedLine> {
                if record.message().starts_with("fix") {
                    return None;
                }
                Some(FormattedLine::new(DEFAULT_GROUP, record.message()))
            }
        }

        let mut changelog = make_changelog("a1 | fix: one\na2 | docs: two")
            .with_formatter(Box::new(SkipFixes));
        changelog.generate().unwrap();
        assert_eq!(changelog.log_count(), 1);
        assert_eq!(changelog.records().len(), 2);
    }

    #[test]
    fn test_unordered_group_is_skipped_but_keeps_headings() {
        let mut changelog = make_changelog("a1 | fix: one\na2 | feat: two")
            .with_config_fn(|config| config.names = vec!["Fixed".to_string()]);
        changelog.generate().unwrap();
        assert_eq!(
            changelog.changelog(),
            "## Change Log\n\n### Fixed\n\n - a1 fix: one"
        );
        assert_eq!(changelog.log_count(), 2);
    }

    #[test]
    fn test_duplicate_names_render_once() {
        let mut changelog = make_changelog("a1 | fix: one\na2 | feat: two")
            .with_config_fn(|config| {
                config.title.clear();
                config.names = vec!["Fixed".into(), "Feature".into(), "Fixed".into()];
            });
        changelog.generate().unwrap();
        assert_eq!(changelog.changelog().matches("fix: one").count(), 1);
    }

    #[test]
    fn test_no_group() {
        let mut changelog = make_changelog("a1 | fix: one\na2 | feat: two")
            .with_config_fn(|config| config.no_group = true);
        changelog.generate().unwrap();
        assert_eq!(
            changelog.changelog(),
            "## Change Log\n - a2 feat: two\n - a1 fix: one"
        );
    }

    #[test]
    fn test_write_to_and_display() {
        let mut changelog = make_changelog("a1 | fix: one");
        changelog.generate().unwrap();

        let mut out = Vec::new();
        let written = changelog.write_to(&mut out).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(String::from_utf8(out).unwrap(), changelog.to_string());
    }

    #[test]
    fn test_fetch_from() {
        let source = |from: &str, to: &str, _args: &[String]| -> chlog_plugin::PluginResult<String> {
            Ok(format!("a1 | feat: {from}...{to}"))
        };

        let mut changelog = Changelog::new();
        changelog.fetch_from(&source, "v1.0.0", "HEAD", &[]).unwrap();
        changelog.parse().unwrap();
        assert_eq!(changelog.records()[0].message(), "feat: v1.0.0...HEAD");
    }

    #[test]
    fn test_fetch_from_error() {
        let source = |_: &str, _: &str, _: &[String]| -> chlog_plugin::PluginResult<String> {
            Err(chlog_plugin::PluginError::SourceFailed("bad revision".to_string()))
        };

        let mut changelog = Changelog::new();
        let err = changelog.fetch_from(&source, "x", "y", &[]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Source("log source failed: bad revision".to_string())
        );
    }

    #[test]
    fn test_message_digest_is_stable() {
        assert_eq!(message_digest("fix: x"), message_digest("fix: x"));
        assert_ne!(message_digest("fix: x"), message_digest("fix: y"));
        assert_eq!(message_digest("").len(), 64);
    }
}
