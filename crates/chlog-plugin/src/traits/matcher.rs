//! Group matcher trait.

/// Group name returned when no rule matches a message.
pub const DEFAULT_GROUP: &str = "Other";

/// Classifies a commit message into a named changelog group.
pub trait GroupMatcher: Send + Sync {
    /// Returns the group name for the message.
    ///
    /// This is a total function: unmatched messages fall into
    /// [`DEFAULT_GROUP`].
    fn match_group(&self, message: &str) -> String;
}

impl<F> GroupMatcher for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn match_group(&self, message: &str) -> String {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_matcher() {
        let matcher = |message: &str| {
            if message.contains("fix") {
                "Fixed".to_string()
            } else {
                DEFAULT_GROUP.to_string()
            }
        };

        assert_eq!(matcher.match_group("fix: bug"), "Fixed");
        assert_eq!(matcher.match_group("docs: readme"), "Other");
    }
}
