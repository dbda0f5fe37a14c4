//! `git log` fetching through the git binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use chlog_plugin::{LogSource, PluginError, PluginResult};
use chlog_record::LogFormat;
use tracing::{debug, info};

use crate::{GitError, GitResult};

/// Runs `git log --reverse --pretty=format:<fmt>` for a revision range.
#[derive(Debug, Clone)]
pub struct GitLog {
    workdir: PathBuf,
    pretty: String,
    with_merges: bool,
    verbose: bool,
}

impl GitLog {
    /// Creates a fetcher running in `workdir` with the default log format.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            pretty: LogFormat::default().pretty().to_string(),
            with_merges: false,
            verbose: false,
        }
    }

    /// Sets the pretty format from a built-in layout.
    #[must_use]
    pub fn with_format(self, format: LogFormat) -> Self {
        self.with_pretty(format.pretty())
    }

    /// Sets the raw `--pretty=format:` value.
    #[must_use]
    pub fn with_pretty(mut self, pretty: impl Into<String>) -> Self {
        self.pretty = pretty.into();
        self
    }

    /// Includes merge commits. By default `--no-merges` is passed.
    #[must_use]
    pub fn with_merges(mut self, with_merges: bool) -> Self {
        self.with_merges = with_merges;
        self
    }

    /// Logs the command line at info level instead of debug.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Builds the `git` arguments for `from...to`. An empty `to` means `HEAD`;
    /// an empty `from` omits the range so git logs all of `HEAD`.
    #[must_use]
    pub fn args(&self, from: &str, to: &str, extra_args: &[String]) -> Vec<String> {

        let mut args = vec![
            "log".to_string(),
            "--reverse".to_string(),
            format!("--pretty=format:{}", self.pretty),
        ];
        if !self.with_merges {
            args.push("--no-merges".to_string());
        }
        args.extend(extra_args.iter().cloned());
        if !from.is_empty() {
            let to = if to.is_empty() { "HEAD" } else { to };
            args.push(format!("{from}...{to}"));
        }
        args
    }

    /// Runs `git log` and returns its stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned or exits unsuccessfully.
    pub fn run(&self, from: &str, to: &str, extra_args: &[String]) -> GitResult<String> {
        let args = self.args(from, to, extra_args);
        let command = format!("git {}", args.join(" "));
        if self.verbose {
            info!(%command, workdir = ?self.workdir, "running git");
        } else {
            debug!(%command, workdir = ?self.workdir, "running git");
        }

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl LogSource for GitLog {
    fn fetch(&self, from: &str, to: &str, extra_args: &[String]) -> PluginResult<String> {
        self.run(from, to, extra_args).map_err(|e| match e {
            GitError::Io(io) => PluginError::Io(io),
            other => PluginError::SourceFailed(other.to_string()),
        })
    }
}
