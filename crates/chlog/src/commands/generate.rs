//! Generate command.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chlog_config::{Config, ConfigError, FilterSpec, Style, find_and_load_config, load_config};
use chlog_core::Changelog;
use chlog_git::{GitLog, Repository};
use chlog_record::LogFormat;
use clap::Args;
use tracing::{debug, info, warn};

/// Output target that prints to standard output.
const STDOUT: &str = "stdout";

/// Remote used to build commit links.
const ORIGIN: &str = "origin";

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Start revision: tag, commit, `last`, `prev`, or a `FROM...TO` range
    pub from: String,

    /// End revision (default: HEAD)
    pub to: Option<String>,

    /// Configuration file (default: chlog.toml in this or a parent directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file, or `stdout`
    #[arg(short, long, default_value = STDOUT)]
    pub output: String,

    /// Drop commits whose message contains any of these keywords
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Include merge commits
    #[arg(long)]
    pub with_merges: bool,

    /// Output style: simple, markdown or ghr
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Repository web URL for commit links (default: from the origin remote)
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Read raw log text from a file instead of running git
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runs the generate command.
pub fn run(args: &GenerateArgs, verbose: bool) -> Result<()> {
    let mut config = load(args)?;
    apply_overrides(&mut config, args);
    let (from, to) = split_range(&args.from, args.to.as_deref());

    let mut changelog = Changelog::with_config(config.changelog.clone());

    if let Some(path) = &args.log_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read log file {}", path.display()))?;
        changelog.set_log_text(text);
    } else {
        let workdir = std::env::current_dir().context("failed to read current directory")?;
        let repo = Repository::discover(&workdir).context("failed to open git repository")?;

        if config.changelog.repo_url.is_empty() && config.changelog.style != Style::Simple {
            match repo.remote_web_url(ORIGIN) {
                Ok(url) => {
                    debug!(%url, "using origin remote for commit links");
                    changelog = changelog.with_config_fn(|c| c.repo_url = url);
                }
                Err(e) => warn!(error = %e, "no repository URL for commit links"),
            }
        }

        let from = repo
            .resolve_revision(&from)
            .with_context(|| format!("failed to resolve revision '{from}'"))?;
        let to = repo
            .resolve_revision(&to)
            .with_context(|| format!("failed to resolve revision '{to}'"))?;
        let format: LogFormat = config
            .changelog
            .log_format
            .parse()
            .context("invalid log_format")?;

        let git_log = GitLog::new(repo.path())
            .with_format(format)
            .with_merges(config.git.with_merges)
            .verbose(verbose);
        changelog
            .fetch_from(&git_log, &from, &to, &config.git.extra_args)
            .context("failed to fetch git log")?;
    }

    changelog.generate().context("failed to generate changelog")?;
    write_output(&changelog, &args.output)?;

    info!(
        lines = changelog.log_count(),
        output = %args.output,
        "changelog generated"
    );
    Ok(())
}

/// Loads the explicit config file, the discovered one, or defaults.
fn load(args: &GenerateArgs) -> Result<Config> {
    if let Some(path) = &args.config {
        return load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => {
            debug!("no chlog.toml found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("failed to load chlog.toml"),
    }
}

/// Applies command line options on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(style) = args.style {
        config.changelog.style = style;
    }
    if let Some(url) = &args.repo_url {
        config.changelog.repo_url.clone_from(url);
    }
    if args.with_merges {
        config.git.with_merges = true;
    }

    let keywords: Vec<String> = args
        .exclude
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    if !keywords.is_empty() {
        config.changelog.filters.push(FilterSpec::Keywords {
            keywords,
            exclude: true,
        });
    }
}

/// Splits `FROM...TO` when no separate end revision is given.
fn split_range(from: &str, to: Option<&str>) -> (String, String) {
    match (to, from.split_once("...")) {
        (Some(to), _) => (from.to_string(), to.to_string()),
        (None, Some((start, end))) if !end.is_empty() => (start.to_string(), end.to_string()),
        (None, Some((start, _))) => (start.to_string(), "HEAD".to_string()),
        (None, None) => (from.to_string(), "HEAD".to_string()),
    }
}

/// Writes the changelog followed by a newline.
fn write_output(changelog: &Changelog, output: &str) -> Result<()> {
    if output == STDOUT {
        let mut stdout = std::io::stdout().lock();
        changelog
            .write_to(&mut stdout)
            .and_then(|_| writeln!(stdout))
            .context("failed to write changelog to stdout")?;
        return Ok(());
    }

    let mut file =
        fs::File::create(output).with_context(|| format!("failed to create {output}"))?;
    changelog
        .write_to(&mut file)
        .and_then(|_| writeln!(file))
        .with_context(|| format!("failed to write {output}"))?;
    Ok(())
}
