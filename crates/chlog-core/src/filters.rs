//! Built-in item filters.

use chlog_config::FilterSpec;
use chlog_plugin::ItemFilter;
use chlog_record::LogRecord;
use tracing::debug;

/// Keeps messages longer than the given number of characters.
#[derive(Debug, Clone, Copy)]
pub struct MinMessageLength(pub usize);

impl ItemFilter for MinMessageLength {
    fn accept(&self, record: &LogRecord) -> bool {
        record.message().chars().count() > self.0
    }
}

/// Keeps messages with more than the given number of space separated words.
#[derive(Debug, Clone, Copy)]
pub struct MinWordCount(pub usize);

impl ItemFilter for MinWordCount {
    fn accept(&self, record: &LogRecord) -> bool {
        record.message().split(' ').count() > self.0
    }
}

/// Keeps messages containing a keyword, or lacking it when excluding.
#[derive(Debug, Clone)]
pub struct Keyword {
    term: String,
    exclude: bool,
}

impl Keyword {
    /// Creates a keyword filter.
    #[must_use]
    pub fn new(term: impl Into<String>, exclude: bool) -> Self {
        Self {
            term: term.into(),
            exclude,
        }
    }
}

impl ItemFilter for Keyword {
    fn accept(&self, record: &LogRecord) -> bool {
        record.message().contains(self.term.as_str()) != self.exclude
    }
}

/// Keeps messages containing any keyword, or none of them when excluding.
#[derive(Debug, Clone)]
pub struct Keywords {
    terms: Vec<String>,
    exclude: bool,
}

impl Keywords {
    /// Creates a keywords filter.
    #[must_use]
    pub fn new<I, S>(terms: I, exclude: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            exclude,
        }
    }
}

impl ItemFilter for Keywords {
    fn accept(&self, record: &LogRecord) -> bool {
        let message = record.message();
        let found = self.terms.iter().any(|term| message.contains(term.as_str()));
        found != self.exclude
    }
}

/// Converts a configured threshold, dropping non-positive values.
fn threshold(min_len: i64) -> Option<usize> {
    usize::try_from(min_len).ok().filter(|n| *n > 0)
}

/// Builds the filter chain from configuration.
///
/// Specs with a non-positive threshold or no keywords are skipped, so
/// `0` or an empty list in the configuration means "no such filter".
#[must_use]
pub fn build_filters(specs: &[FilterSpec]) -> Vec<Box<dyn ItemFilter>> {
    let mut filters: Vec<Box<dyn ItemFilter>> = Vec::with_capacity(specs.len());

    for spec in specs {
        let filter: Option<Box<dyn ItemFilter>> = match spec {
            FilterSpec::MsgLen { min_len } => {
                threshold(*min_len).map(|n| Box::new(MinMessageLength(n)) as Box<dyn ItemFilter>)
            }
            FilterSpec::WordsLen { min_len } => {
                threshold(*min_len).map(|n| Box::new(MinWordCount(n)) as Box<dyn ItemFilter>)
            }
            FilterSpec::Keyword { keyword, exclude } => (!keyword.is_empty())
                .then(|| Box::new(Keyword::new(keyword.as_str(), *exclude)) as Box<dyn ItemFilter>),
            FilterSpec::Keywords { keywords, exclude } => {
                let terms: Vec<&String> = keywords.iter().filter(|k| !k.is_empty()).collect();
                (!terms.is_empty())
                    .then(|| Box::new(Keywords::new(terms, *exclude)) as Box<dyn ItemFilter>)
            }
        };

        match filter {
            Some(filter) => filters.push(filter),
            None => debug!(?spec, "skipping no-op filter"),
        }
    }

    filters
}
