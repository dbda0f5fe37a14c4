//! Initialize command.

use anyhow::{Context, Result};
use chlog_config::{CONFIG_FILE_NAME, Config, RuleConfig, Style, write_config};
use chlog_matcher_rules::default_rules;
use clap::Args;
use tracing::info;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output style written to the configuration
    #[arg(short, long)]
    pub style: Option<Style>,
}

/// Runs the init command.
pub fn run(args: &InitArgs) -> Result<()> {
    let path = std::env::current_dir()
        .context("failed to read current directory")?
        .join(CONFIG_FILE_NAME);

    let config = default_config(args.style.unwrap_or_default());
    write_config(&path, &config, args.force)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "configuration created");
    println!("Created {}", path.display());
    Ok(())
}

/// Default configuration with the built-in rules spelled out.
fn default_config(style: Style) -> Config {
    let mut config = Config::default();
    config.changelog.style = style;
    config.changelog.rules = default_rules()
        .iter()
        .map(|rule| RuleConfig {
            name: rule.name().to_string(),
            starts_with: rule.prefixes().to_vec(),
            contains: rule.substrings().to_vec(),
        })
        .collect();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_rules() {
        let config = default_config(Style::Markdown);

        assert_eq!(config.changelog.style, Style::Markdown);
        assert_eq!(config.changelog.rules.len(), 4);
        assert_eq!(config.changelog.rules[0].name, "Feature");
        assert_eq!(config.changelog.rules[0].starts_with, vec!["feat", "new", "add"]);
        assert_eq!(
            config.changelog.group_names(),
            vec!["Feature", "Refactor", "Update", "Fixed", "Other"]
        );
    }
}
