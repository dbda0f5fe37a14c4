//! Plugin error types.

use thiserror::Error;

/// Plugin-related errors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The log source could not produce log text.
    #[error("log source failed: {0}")]
    SourceFailed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failed_display() {
        let err = PluginError::SourceFailed("git exited with 128".to_string());
        assert_eq!(err.to_string(), "log source failed: git exited with 128");
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PluginError = io.into();
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn test_plugin_result_err() {
        let result: PluginResult<i32> = Err(PluginError::SourceFailed("test".to_string()));
        assert!(result.is_err());
    }
}
