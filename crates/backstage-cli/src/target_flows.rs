use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use backstage_targets::{confirm, TargetFs, TargetRegistry, TargetRow};

use crate::dispatch::{CommandOutcome, CommandResult};
use crate::render::render_table;

pub(crate) const TARGET_TABLE_HEADER: [&str; 3] = ["Default", "Label", "Backstage Server"];

const REMOVE_CONFIRMATION: &str =
    "Are you sure you want to remove this target? This action cannot be undone.";

pub(crate) fn run_target_add<F: TargetFs>(
    fs: F,
    targets_path: &Path,
    label: &str,
    endpoint: &str,
) -> CommandResult {
    let mut registry = TargetRegistry::load(fs, targets_path)?;
    registry.add(label, endpoint)?;
    Ok(CommandOutcome::Message(
        "Your new target has been added.".to_string(),
    ))
}

pub(crate) fn run_target_list<F: TargetFs>(fs: F, targets_path: &Path) -> CommandResult {
    let registry = TargetRegistry::load(fs, targets_path)?;
    Ok(CommandOutcome::Lines(format_target_table_lines(
        &registry.list(),
    )))
}

/// Asks for confirmation before loading; a decline leaves the targets file
/// untouched.
pub(crate) fn run_target_remove<F, R, W>(
    fs: F,
    targets_path: &Path,
    label: &str,
    input: &mut R,
    output: &mut W,
) -> CommandResult
where
    F: TargetFs,
    R: BufRead,
    W: Write,
{
    let confirmed = confirm(input, output, REMOVE_CONFIRMATION)
        .context("failed reading remove confirmation")?;
    if !confirmed {
        tracing::debug!(label, "target removal declined");
        return Ok(CommandOutcome::Cancelled);
    }

    let mut registry = TargetRegistry::load(fs, targets_path)?;
    registry.remove(label)?;
    Ok(CommandOutcome::Message(format!(
        "The target `{label}` has been removed."
    )))
}

pub(crate) fn run_target_set<F: TargetFs>(
    fs: F,
    targets_path: &Path,
    label: &str,
) -> CommandResult {
    let mut registry = TargetRegistry::load(fs, targets_path)?;
    registry.set_default(label)?;
    Ok(CommandOutcome::Message(
        "You have a new target as default!".to_string(),
    ))
}

pub(crate) fn run_target_current<F: TargetFs>(fs: F, targets_path: &Path) -> CommandResult {
    let registry = TargetRegistry::load(fs, targets_path)?;
    let message = match registry.current() {
        Some(target) => format!("default target: {} ({})", target.label, target.endpoint),
        None => "No default target is set.".to_string(),
    };
    Ok(CommandOutcome::Message(message))
}

pub(crate) fn format_target_table_lines(rows: &[TargetRow]) -> Vec<String> {
    let cells = rows
        .iter()
        .map(|row| {
            let marker = if row.is_default { "*" } else { "" };
            vec![
                marker.to_string(),
                row.label.clone(),
                row.endpoint.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&TARGET_TABLE_HEADER, &cells)
}
