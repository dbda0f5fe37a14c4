//! Rule based group matcher plugin.
//!
//! Messages are classified by ordered rules in two passes: every rule's
//! prefix patterns are tried before any rule's substring patterns.
//! Leading `:code:` annotations (gitmoji text codes) can be stripped first.

use chlog_plugin::{DEFAULT_GROUP, GroupMatcher, Plugin};

/// Maximum number of leading `:code:` annotations stripped from a message.
const MAX_LEADING_CODES: usize = 2;

/// A named classification rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    name: String,
    starts_with: Vec<String>,
    contains: Vec<String>,
}

impl Rule {
    /// Creates a rule without patterns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            starts_with: Vec::new(),
            contains: Vec::new(),
        }
    }

    /// Sets the prefix patterns.
    #[must_use]
    pub fn starts_with<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.starts_with = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the substring patterns.
    #[must_use]
    pub fn contains<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the prefix patterns.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.starts_with
    }

    /// Returns the substring patterns.
    #[must_use]
    pub fn substrings(&self) -> &[String] {
        &self.contains
    }

    fn matches_prefix(&self, message: &str) -> bool {
        self.starts_with.iter().any(|p| message.starts_with(p.as_str()))
    }

    fn matches_substring(&self, message: &str) -> bool {
        self.contains.iter().any(|p| message.contains(p.as_str()))
    }
}

/// Returns the built-in rule set.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("Feature")
            .starts_with(["feat", "new", "add"])
            .contains(["feat:", "feat("]),
        Rule::new("Refactor")
            .starts_with(["break", "refactor"])
            .contains(["refactor:"]),
        Rule::new("Update")
            .starts_with(["up:", "up(", "update"])
            .contains(["up:", "update:"]),
        Rule::new("Fixed")
            .starts_with(["bug", "close", "fix"])
            .contains(["fix:", "bug:"]),
    ]
}

/// Matches commit messages against ordered [`Rule`]s.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    rules: Vec<Rule>,
    strip_codes: bool,
}

impl RuleMatcher {
    /// Creates a matcher over the given rules, with `:code:` stripping on.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            strip_codes: true,
        }
    }

    /// Enables or disables stripping of leading `:code:` annotations.
    #[must_use]
    pub fn with_strip_codes(mut self, strip_codes: bool) -> Self {
        self.strip_codes = strip_codes;
        self
    }

    /// Returns the rules in match order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the rule names followed by the catch-all group.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.iter().map(|r| r.name.clone()).collect();
        if !names.iter().any(|n| n == DEFAULT_GROUP) {
            names.push(DEFAULT_GROUP.to_string());
        }
        names
    }

    /// Returns the message as the rules see it.
    #[must_use]
    pub fn normalize<'a>(&self, message: &'a str) -> &'a str {
        if !self.strip_codes {
            return message;
        }

        let mut rest = message.trim();
        for _ in 0..MAX_LEADING_CODES {
            match strip_leading_code(rest) {
                Some(stripped) => rest = stripped,
                None => break,
            }
        }
        rest.trim()
    }
}

impl Default for RuleMatcher {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Strips one leading `:code:` annotation, or returns `None` if there is none.
fn strip_leading_code(s: &str) -> Option<&str> {
    let after_colon = s.strip_prefix(':')?;
    let end = after_colon.find(':')?;
    let code = &after_colon[..end];
    if code.is_empty() || code.contains(char::is_whitespace) {
        return None;
    }
    Some(after_colon[end + 1..].trim_start())
}

impl Plugin for RuleMatcher {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Groups commits by message prefix and keyword rules"
    }
}

impl GroupMatcher for RuleMatcher {
    fn match_group(&self, message: &str) -> String {
        let message = self.normalize(message);

        self.rules
            .iter()
            .find(|rule| rule.matches_prefix(message))
            .or_else(|| self.rules.iter().find(|rule| rule.matches_substring(message)))
            .map_or_else(|| DEFAULT_GROUP.to_string(), |rule| rule.name.clone())
    }
}
