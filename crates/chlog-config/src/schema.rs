//! Configuration schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Group names rendered when neither names nor rules are configured.
const DEFAULT_GROUP_NAMES: [&str; 5] = ["Feature", "Refactor", "Update", "Fixed", "Other"];

/// Catch-all group appended to names derived from rules.
const CATCH_ALL_GROUP: &str = "Other";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// `git log` invocation configuration.
    #[serde(default)]
    pub git: GitConfig,
}

/// Output style of the rendered changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    /// ` - abc1234 message by(user)`.
    #[default]
    #[serde(rename = "simple", alias = "plain")]
    Simple,
    /// Markdown list items with commit links.
    #[serde(
        rename = "markdown",
        alias = "md",
        alias = "mkdown",
        alias = "mkDown",
        alias = "mkd"
    )]
    Markdown,
    /// GitHub release notes with bare commit URLs and @-mentions.
    #[serde(
        rename = "ghr",
        alias = "gh-release",
        alias = "ghRelease",
        alias = "release",
        alias = "gh"
    )]
    GhRelease,
}

impl Style {
    /// Returns the canonical name of the style.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Markdown => "markdown",
            Self::GhRelease => "ghr",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "simple" | "plain" => Ok(Self::Simple),
            "markdown" | "md" | "mkdown" | "mkDown" | "mkd" => Ok(Self::Markdown),
            "ghr" | "gh-release" | "ghRelease" | "release" | "gh" => Ok(Self::GhRelease),
            other => Err(ConfigError::Invalid(format!("unknown style '{other}'"))),
        }
    }
}

/// A named group classification rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Group name.
    pub name: String,

    /// Message prefixes that select this group.
    #[serde(default)]
    pub starts_with: Vec<String>,

    /// Message substrings that select this group.
    #[serde(default)]
    pub contains: Vec<String>,
}

/// An item filter specification.
///
/// Non-positive thresholds and empty keyword sets load fine; they are
/// dropped when the filter chain is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    /// Keep messages longer than `min_len` characters.
    MsgLen {
        /// Minimum length (exclusive).
        min_len: i64,
    },
    /// Keep messages with more than `min_len` space-separated words.
    WordsLen {
        /// Minimum word count (exclusive).
        min_len: i64,
    },
    /// Keep messages containing `keyword`, or the opposite with `exclude`.
    Keyword {
        /// Substring to look for.
        keyword: String,
        /// Invert the match.
        #[serde(default)]
        exclude: bool,
    },
    /// Keep messages containing any of `keywords`, or none of them with `exclude`.
    Keywords {
        /// Substrings to look for.
        keywords: Vec<String>,
        /// Invert the match.
        #[serde(default)]
        exclude: bool,
    },
}

/// Changelog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Heading line placed before all groups. Empty for none.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output style.
    #[serde(default)]
    pub style: Style,

    /// Log format name (`hs`, `hsa`, ...) or the literal pretty format.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Repository web URL used for commit links.
    #[serde(default)]
    pub repo_url: String,

    /// Text placed before a group heading.
    #[serde(default = "default_group_prefix")]
    pub group_prefix: String,

    /// Text placed after a group heading.
    #[serde(default = "default_group_suffix")]
    pub group_suffix: String,

    /// Never render group headings.
    #[serde(default)]
    pub no_group: bool,

    /// Drop records whose message repeats an earlier one.
    #[serde(default = "default_true")]
    pub remove_repeats: bool,

    /// Strip leading `:emoji:` codes before matching a group.
    #[serde(default = "default_true")]
    pub strip_emoji_prefix: bool,

    /// Group output order.
    #[serde(default)]
    pub names: Vec<String>,

    /// Group classification rules. Empty means the built-in rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Item filters, applied in order.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            style: Style::default(),
            log_format: default_log_format(),
            repo_url: String::new(),
            group_prefix: default_group_prefix(),
            group_suffix: default_group_suffix(),
            no_group: false,
            remove_repeats: true,
            strip_emoji_prefix: true,
            names: Vec::new(),
            rules: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl ChangelogConfig {
    /// Returns the group output order.
    ///
    /// Explicit `names` win. Otherwise names come from the rules followed
    /// by the catch-all `Other`, or the built-in order when no rules are set.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        if !self.names.is_empty() {
            return self.names.clone();
        }

        if self.rules.is_empty() {
            return DEFAULT_GROUP_NAMES.iter().map(ToString::to_string).collect();
        }

        let mut names: Vec<String> = self.rules.iter().map(|rule| rule.name.clone()).collect();
        if !names.iter().any(|name| name == CATCH_ALL_GROUP) {
            names.push(CATCH_ALL_GROUP.to_string());
        }
        names
    }
}

fn default_title() -> String {
    "## Change Log".to_string()
}

fn default_log_format() -> String {
    "hs".to_string()
}

fn default_group_prefix() -> String {
    "\n### ".to_string()
}

fn default_group_suffix() -> String {
    "\n".to_string()
}

fn default_true() -> bool {
    true
}

/// `git log` invocation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    /// Include merge commits. When false `--no-merges` is passed.
    #[serde(default)]
    pub with_merges: bool,

    /// Extra arguments appended to `git log`.
    #[serde(default)]
    pub extra_args: Vec<String>,
}
