//! Log source trait.

use crate::PluginResult;

/// Fetches raw `git log` text for a revision range.
///
/// Implementations may shell out to git, read a file, or return a fixture.
pub trait LogSource {
    /// Returns the raw, newline-separated log text for `from...to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log text cannot be produced.
    fn fetch(&self, from: &str, to: &str, extra_args: &[String]) -> PluginResult<String>;
}

impl<F> LogSource for F
where
    F: Fn(&str, &str, &[String]) -> PluginResult<String>,
{
    fn fetch(&self, from: &str, to: &str, extra_args: &[String]) -> PluginResult<String> {
        self(from, to, extra_args)
    }
}
