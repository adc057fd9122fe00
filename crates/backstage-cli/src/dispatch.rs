use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use backstage_targets::{TargetError, TargetFs};

use crate::completion::write_completions_script;
use crate::render::{render_status_line, write_lines, OutputStyle};
use crate::target_flows::{
    run_target_add, run_target_current, run_target_list, run_target_remove, run_target_set,
};
use crate::Commands;

pub(crate) struct CommandStreams<R, W> {
    pub(crate) input: R,
    pub(crate) output: W,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandOutcome {
    /// One status message, badged in rich output.
    Message(String),
    /// Pre-formatted output printed as is.
    Lines(Vec<String>),
    /// Declined confirmation or missing label; nothing was changed.
    Cancelled,
}

#[derive(Debug)]
pub(crate) enum CommandFailure {
    Target(TargetError),
    Unexpected(anyhow::Error),
}

impl From<TargetError> for CommandFailure {
    fn from(err: TargetError) -> Self {
        Self::Target(err)
    }
}

impl From<anyhow::Error> for CommandFailure {
    fn from(err: anyhow::Error) -> Self {
        Self::Unexpected(err)
    }
}

pub(crate) type CommandResult = std::result::Result<CommandOutcome, CommandFailure>;

pub(crate) fn run_command<F, R, W>(
    command: Commands,
    fs: F,
    targets_path: Result<PathBuf>,
    streams: &mut CommandStreams<R, W>,
    style: OutputStyle,
) where
    F: TargetFs,
    R: BufRead,
    W: Write,
{
    let command_name = command.name();
    let result = execute_command(command, fs, targets_path, streams);
    let lines = render_command_result(command_name, result, style);
    if let Err(err) = write_lines(&mut streams.output, &lines) {
        tracing::debug!(command = command_name, error = %err, "failed writing command output");
    }
}

fn execute_command<F, R, W>(
    command: Commands,
    fs: F,
    targets_path: Result<PathBuf>,
    streams: &mut CommandStreams<R, W>,
) -> CommandResult
where
    F: TargetFs,
    R: BufRead,
    W: Write,
{
    match command {
        Commands::TargetAdd { label, endpoint } => {
            if label.is_empty() {
                return Ok(CommandOutcome::Cancelled);
            }
            run_target_add(fs, &targets_path?, &label, &endpoint)
        }
        Commands::TargetList => run_target_list(fs, &targets_path?),
        Commands::TargetRemove { label } => {
            if label.is_empty() {
                return Ok(CommandOutcome::Cancelled);
            }
            run_target_remove(
                fs,
                &targets_path?,
                &label,
                &mut streams.input,
                &mut streams.output,
            )
        }
        Commands::TargetSet { label } => {
            if label.is_empty() {
                return Ok(CommandOutcome::Cancelled);
            }
            run_target_set(fs, &targets_path?, &label)
        }
        Commands::TargetCurrent => run_target_current(fs, &targets_path?),
        Commands::Completions { shell } => {
            write_completions_script(shell, &mut streams.output)?;
            Ok(CommandOutcome::Lines(Vec::new()))
        }
        Commands::Version => Ok(CommandOutcome::Lines(vec![
            env!("CARGO_PKG_VERSION").to_string()
        ])),
    }
}

pub(crate) fn render_command_result(
    command_name: &str,
    result: CommandResult,
    style: OutputStyle,
) -> Vec<String> {
    match result {
        Ok(CommandOutcome::Message(message)) => vec![render_status_line(style, "ok", &message)],
        Ok(CommandOutcome::Lines(lines)) => lines,
        Ok(CommandOutcome::Cancelled) => Vec::new(),
        Err(CommandFailure::Target(err)) => {
            vec![render_status_line(style, "error", &err.to_string())]
        }
        Err(CommandFailure::Unexpected(err)) => {
            let detail = format!("{err:#}");
            tracing::debug!(command = command_name, error = %detail, "command failed unexpectedly");
            vec![unserviceable_request_line(command_name)]
        }
    }
}

pub(crate) fn unserviceable_request_line(command_name: &str) -> String {
    format!(
        "The request was invalid or cannot be served. For more details, please run: `backstage {command_name} -h`."
    )
}
