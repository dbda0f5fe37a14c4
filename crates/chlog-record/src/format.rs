//! `git log` pretty-format layouts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator placed between fields by every built-in pretty format.
pub const FIELD_SEPARATOR: &str = " | ";

/// Error returned when a log format name is not one of the built-in layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported log format '{0}'")]
pub struct UnknownLogFormat(pub String);

/// The built-in `git log --pretty` layouts a log line can be split by.
///
/// See <https://git-scm.com/docs/pretty-formats>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogFormat {
    /// `%H | %s`: hash, subject.
    #[default]
    HashSubject,
    /// `%H | %s | %an`: hash, subject, author name.
    HashSubjectAuthor,
    /// `%H | %s | %cn`: hash, subject, committer name.
    HashSubjectCommitter,
    /// `%H | %s | %ai`: hash, subject, author date.
    HashSubjectAuthorDate,
    /// `%H | %s | %ci`: hash, subject, commit date.
    HashSubjectCommitDate,
}

impl LogFormat {
    /// All built-in formats.
    pub const ALL: [Self; 5] = [
        Self::HashSubject,
        Self::HashSubjectAuthor,
        Self::HashSubjectCommitter,
        Self::HashSubjectAuthorDate,
        Self::HashSubjectCommitDate,
    ];

    /// Returns the short name used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HashSubject => "hs",
            Self::HashSubjectAuthor => "hsa",
            Self::HashSubjectCommitter => "hsc",
            Self::HashSubjectAuthorDate => "hsd",
            Self::HashSubjectCommitDate => "hsd1",
        }
    }

    /// Returns the value for `git log --pretty=format:<value>`.
    #[must_use]
    pub fn pretty(self) -> &'static str {
        match self {
            Self::HashSubject => "%H | %s",
            Self::HashSubjectAuthor => "%H | %s | %an",
            Self::HashSubjectCommitter => "%H | %s | %cn",
            Self::HashSubjectAuthorDate => "%H | %s | %ai",
            Self::HashSubjectCommitDate => "%H | %s | %ci",
        }
    }

    /// Returns how many fields a line in this format is split into.
    #[must_use]
    pub fn field_count(self) -> usize {
        match self {
            Self::HashSubject => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    /// Accepts either the short name (`hsa`) or the pretty format itself
    /// (`%H | %s | %an`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s) || format.pretty() == s)
            .ok_or_else(|| UnknownLogFormat(s.to_string()))
    }
}
