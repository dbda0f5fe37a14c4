//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found.
    #[error("repository not found at {0}")]
    RepoNotFound(std::path::PathBuf),

    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// No tag for a revision keyword.
    #[error("tag not found: {0}")]
    TagNotFound(String),

    /// Remote not found.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// Remote URL could not be parsed.
    #[error("invalid remote URL: {0}")]
    InvalidRemoteUrl(String),

    /// The git binary exited with an error.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Trimmed stderr output.
        stderr: String,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_tag_not_found_display() {
        let err = GitError::TagNotFound("last".to_string());
        assert_eq!(err.to_string(), "tag not found: last");
    }

    #[test]
    fn test_remote_not_found_display() {
        let err = GitError::RemoteNotFound("origin".to_string());
        assert_eq!(err.to_string(), "remote not found: origin");
    }

    #[test]
    fn test_command_failed_display() {
        let err = GitError::CommandFailed {
            command: "git log".to_string(),
            stderr: "bad revision".to_string(),
        };
        assert_eq!(err.to_string(), "`git log` failed: bad revision");
    }
}
