//! Core error types.

use chlog_record::UnknownLogFormat;
use thiserror::Error;

/// Core-related errors.
///
/// Errors are cloneable so a failed parse can be replayed on later calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The log text is empty after trimming.
    #[error("empty git log text for parse")]
    EmptyInput,

    /// The configured log format has no known field layout.
    #[error("unsupported log format '{0}'")]
    UnsupportedLogFormat(String),

    /// The log source failed to produce text.
    #[error("log source error: {0}")]
    Source(String),
}

impl From<UnknownLogFormat> for CoreError {
    fn from(err: UnknownLogFormat) -> Self {
        Self::UnsupportedLogFormat(err.0)
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        assert_eq!(
            CoreError::EmptyInput.to_string(),
            "empty git log text for parse"
        );
    }

    #[test]
    fn test_from_unknown_log_format() {
        let err: CoreError = UnknownLogFormat("%h".to_string()).into();
        assert_eq!(err, CoreError::UnsupportedLogFormat("%h".to_string()));
        assert_eq!(err.to_string(), "unsupported log format '%h'");
    }
}
