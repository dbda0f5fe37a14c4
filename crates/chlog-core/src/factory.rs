//! Builds pipeline stages from configuration.

use chlog_config::{ChangelogConfig, Style};
use chlog_formatter_text::{MarkdownFormatter, PlainFormatter, ReleaseNoteFormatter};
use chlog_matcher_rules::{Rule, RuleMatcher, default_rules};
use chlog_parser_pipe::PipeParser;
use chlog_plugin::{Formatter, ItemFilter};
use chlog_record::LogFormat;

use crate::CoreResult;
use crate::filters::build_filters;

/// Creates the built-in line parser for the configured log format.
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedLogFormat`](crate::CoreError::UnsupportedLogFormat)
/// if the format is not one of the known layouts.
pub fn create_parser(config: &ChangelogConfig) -> CoreResult<PipeParser> {
    let format: LogFormat = config.log_format.parse()?;
    Ok(PipeParser::new(format))
}

/// Creates the group matcher from the configured rules.
///
/// An empty rule list selects the built-in rules.
#[must_use]
pub fn create_matcher(config: &ChangelogConfig) -> RuleMatcher {
    let rules = if config.rules.is_empty() {
        default_rules()
    } else {
        config
            .rules
            .iter()
            .map(|rule| {
                Rule::new(rule.name.as_str())
                    .starts_with(rule.starts_with.iter().map(String::as_str))
                    .contains(rule.contains.iter().map(String::as_str))
            })
            .collect()
    };

    RuleMatcher::new(rules).with_strip_codes(config.strip_emoji_prefix)
}

/// Creates the formatter for the configured style.
#[must_use]
pub fn create_formatter(config: &ChangelogConfig) -> Box<dyn Formatter> {
    let plain = PlainFormatter::new(create_matcher(config));

    match config.style {
        Style::Simple => Box::new(plain),
        Style::Markdown => Box::new(MarkdownFormatter::new(plain, config.repo_url.as_str())),
        Style::GhRelease => Box::new(ReleaseNoteFormatter::new(MarkdownFormatter::new(
            plain,
            config.repo_url.as_str(),
        ))),
    }
}

/// Creates the configured filter chain.
#[must_use]
pub fn create_filters(config: &ChangelogConfig) -> Vec<Box<dyn ItemFilter>> {
    build_filters(&config.filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chlog_config::{FilterSpec, RuleConfig};
    use chlog_plugin::GroupMatcher;
    use chlog_record::LogRecord;

    use crate::CoreError;

    #[test]
    fn test_create_parser_default() {
        let parser = create_parser(&ChangelogConfig::default()).unwrap();
        assert_eq!(parser.format(), LogFormat::HashSubject);
    }

    #[test]
    fn test_create_parser_pretty_text() {
        let config = ChangelogConfig {
            log_format: "%H | %s | %an".to_string(),
            ..ChangelogConfig::default()
        };
        let parser = create_parser(&config).unwrap();
        assert_eq!(parser.format(), LogFormat::HashSubjectAuthor);
    }

    #[test]
    fn test_create_parser_unknown() {
        let config = ChangelogConfig {
            log_format: "oneline".to_string(),
            ..ChangelogConfig::default()
        };
        assert_eq!(
            create_parser(&config).unwrap_err(),
            CoreError::UnsupportedLogFormat("oneline".to_string())
        );
    }

    #[test]
    fn test_create_matcher_custom_rules() {
        let config = ChangelogConfig {
            rules: vec![RuleConfig {
                name: "Docs".to_string(),
                starts_with: vec!["docs".to_string()],
                contains: Vec::new(),
            }],
            ..ChangelogConfig::default()
        };
        let matcher = create_matcher(&config);
        assert_eq!(matcher.match_group("docs: readme"), "Docs");
        assert_eq!(matcher.match_group("feat: x"), "Other");
    }

    #[test]
    fn test_create_matcher_strip_flag() {
        let config = ChangelogConfig {
            strip_emoji_prefix: false,
            ..ChangelogConfig::default()
        };
        let matcher = create_matcher(&config);
        assert_eq!(matcher.match_group(":sparkles: new thing"), "Other");
    }

    #[test]
    fn test_create_formatter_styles() {
        let record = LogRecord::new("deadbeef1234", "feat: x");

        for (style, name, line) in [
            (Style::Simple, "simple", " - deadbee feat: x"),
            (
                Style::Markdown,
                "markdown",
                "- feat: x [deadbee](https://example.com/r/commit/deadbeef1234)",
            ),
            (
                Style::GhRelease,
                "ghr",
                "- feat: x https://example.com/r/commit/deadbeef1234",
            ),
        ] {
            let config = ChangelogConfig {
                style,
                repo_url: "https://example.com/r".to_string(),
                ..ChangelogConfig::default()
            };
            let formatter = create_formatter(&config);
            assert_eq!(formatter.name(), name);
            assert_eq!(formatter.format(&record).unwrap().line, line);
        }
    }

    #[test]
    fn test_create_filters() {
        let config = ChangelogConfig {
            filters: vec![
                FilterSpec::MsgLen { min_len: 0 },
                FilterSpec::WordsLen { min_len: 1 },
            ],
            ..ChangelogConfig::default()
        };
        assert_eq!(create_filters(&config).len(), 1);
    }
}
