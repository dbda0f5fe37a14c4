//! Log record parsed from one `git log` line.

use serde::{Deserialize, Serialize};

/// Length of an abbreviated commit hash.
const ABBREV_LEN: usize = 7;

/// One commit entry, as parsed from a single `git log` output line.
///
/// Records are built once by a line parser and never mutated afterwards,
/// which is why the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    hash_id: String,
    message: String,
    date: String,
    author: String,
    committer: String,
}

impl LogRecord {
    /// Creates a record with a hash and a subject line.
    #[must_use]
    pub fn new(hash_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::builder(hash_id, message).build()
    }

    /// Creates a new record builder.
    #[must_use]
    pub fn builder(hash_id: impl Into<String>, message: impl Into<String>) -> LogRecordBuilder {
        LogRecordBuilder::new(hash_id, message)
    }

    /// Returns the full commit hash, empty when the log format omits it.
    #[must_use]
    pub fn hash_id(&self) -> &str {
        &self.hash_id
    }

    /// Returns the commit subject line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the author or commit date text, empty when not requested.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the author name, empty when not requested.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the committer name, empty when not requested.
    #[must_use]
    pub fn committer(&self) -> &str {
        &self.committer
    }

    /// Returns the first 7 characters of the hash.
    #[must_use]
    pub fn abbrev_id(&self) -> &str {
        match self.hash_id.char_indices().nth(ABBREV_LEN) {
            Some((idx, _)) => &self.hash_id[..idx],
            None => &self.hash_id,
        }
    }

    /// Returns the author, falling back to the committer.
    #[must_use]
    pub fn username(&self) -> &str {
        if self.author.is_empty() {
            &self.committer
        } else {
            &self.author
        }
    }
}

/// Builder for [`LogRecord`].
#[derive(Debug)]
pub struct LogRecordBuilder {
    hash_id: String,
    message: String,
    date: String,
    author: String,
    committer: String,
}

impl LogRecordBuilder {
    fn new(hash_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash_id: hash_id.into(),
            message: message.into(),
            date: String::new(),
            author: String::new(),
            committer: String::new(),
        }
    }

    /// Sets the date text.
    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the author name.
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the committer name.
    #[must_use]
    pub fn committer(mut self, committer: impl Into<String>) -> Self {
        self.committer = committer.into();
        self
    }

    /// Builds the [`LogRecord`].
    #[must_use]
    pub fn build(self) -> LogRecord {
        LogRecord {
            hash_id: self.hash_id,
            message: self.message,
            date: self.date,
            author: self.author,
            committer: self.committer,
        }
    }
}
