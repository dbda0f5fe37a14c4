//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Generate changelogs from git commit history.
#[derive(Debug, Parser)]
#[command(name = "chlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a changelog for a revision range
    Generate(commands::generate::GenerateArgs),

    /// Write a default chlog.toml
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => commands::generate::run(&args, self.verbose),
            Commands::Init(args) => commands::init::run(&args),
        }
    }
}
