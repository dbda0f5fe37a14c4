//! Item filter trait.

use chlog_record::LogRecord;

/// A predicate over parsed records.
///
/// A record survives the filter chain only if every filter accepts it.
pub trait ItemFilter: Send + Sync {
    /// Returns true if the record should be kept.
    fn accept(&self, record: &LogRecord) -> bool;
}

impl<F> ItemFilter for F
where
    F: Fn(&LogRecord) -> bool + Send + Sync,
{
    fn accept(&self, record: &LogRecord) -> bool {
        self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_filter() {
        let no_wip = |record: &LogRecord| !record.message().starts_with("wip");

        assert!(no_wip.accept(&LogRecord::new("h", "fix: bug")));
        assert!(!no_wip.accept(&LogRecord::new("h", "wip: half done")));
    }
}
