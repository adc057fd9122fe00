use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use backstage_targets::OsFs;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod completion;
mod dispatch;
mod render;
mod target_flows;

use dispatch::{run_command, CommandStreams};
use render::resolve_output_style;

const TARGETS_FILE_NAME: &str = ".backstage_targets";

#[derive(Parser, Debug)]
#[command(name = "backstage")]
#[command(version, about = "An open source solution for publishing APIs", long_about = None)]
struct Cli {
    /// Targets file to use instead of ~/.backstage_targets
    #[arg(long, global = true, env = "BACKSTAGE_TARGETS_FILE")]
    targets_file: Option<PathBuf>,
    /// Print plain output without badges or colors
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new target in the list of targets.
    TargetAdd { label: String, endpoint: String },
    /// List the registered targets.
    TargetList,
    /// Remove a target from the list of targets.
    TargetRemove { label: String },
    /// Set a target as default.
    TargetSet { label: String },
    /// Show the default target.
    TargetCurrent,
    /// Write a shell completion script to stdout.
    Completions {
        #[arg(value_enum)]
        shell: CliCompletionShell,
    },
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::TargetAdd { .. } => "target-add",
            Commands::TargetList => "target-list",
            Commands::TargetRemove { .. } => "target-remove",
            Commands::TargetSet { .. } => "target-set",
            Commands::TargetCurrent => "target-current",
            Commands::Completions { .. } => "completions",
            Commands::Version => "version",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let style = resolve_output_style(io::stdout().is_terminal(), cli.plain);
    let targets_path = cli.targets_file.map(Ok).unwrap_or_else(default_targets_path);

    let stdin = io::stdin();
    let mut streams = CommandStreams {
        input: stdin.lock(),
        output: io::stdout().lock(),
    };
    run_command(cli.command, OsFs, targets_path, &mut streams, style);
}

fn default_targets_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot resolve targets file")?;
    Ok(PathBuf::from(home).join(TARGETS_FILE_NAME))
}
