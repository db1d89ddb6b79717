//! Command-line interface for the ScatterScore engine.
//!
//! The binary scores JSON company snapshots onto chart coordinates, edits
//! axis weight sets through the rebalancer and lists the built-in scoring
//! templates. Every command writes pretty-printed JSON.
#![forbid(unsafe_code)]

use std::io::{BufReader, Write};

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::{Serialize, de::DeserializeOwned};

mod error;
mod rebalance;
mod score;
mod templates;

pub use error::CliError;

use rebalance::{RebalanceArgs, run_rebalance};
use score::{ScoreArgs, run_score};
use templates::run_templates;

pub(crate) const ARG_SCORE_REQUEST: &str = "request";
pub(crate) const ARG_SCORE_GLOBAL_RANGES: &str = "global-ranges";
pub(crate) const ARG_SCORE_NORMALIZATION: &str = "normalization";
pub(crate) const ARG_SCORE_IMPUTATION: &str = "imputation";
pub(crate) const ARG_SCORE_TEMPLATE: &str = "template";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_REBALANCE_AXIS: &str = "axis";
pub(crate) const ARG_REBALANCE_ADD: &str = "add";
pub(crate) const ARG_REBALANCE_REMOVE: &str = "remove";
pub(crate) const ARG_REBALANCE_SET: &str = "set";
pub(crate) const ARG_REBALANCE_WEIGHT: &str = "weight";
pub(crate) const ENV_SCORE_REQUEST: &str = "SCATTERSCORE_CMDS_SCORE_REQUEST_PATH";
pub(crate) const ENV_REBALANCE_AXIS: &str = "SCATTERSCORE_CMDS_REBALANCE_AXIS_PATH";

/// Run the ScatterScore CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, when an
/// input cannot be read or decoded, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Rebalance(args) => run_rebalance(args),
        Command::Templates => run_templates(),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "scatterscore",
    about = "Weighted multi-metric scoring for mining company scatter charts",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Score a JSON request into plot points.
    Score(ScoreArgs),
    /// Apply one edit to an axis and rebalance its weights.
    Rebalance(RebalanceArgs),
    /// Print the built-in scoring templates.
    Templates,
}

/// Report an error unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match scatterscore_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode a JSON document from `path`.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = scatterscore_fs::open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON to `output`, or to `writer` when no path is set.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    payload.push('\n');
    if let Some(path) = output {
        return scatterscore_fs::write_utf8_file(path, payload.as_bytes()).map_err(|source| {
            CliError::WriteOutputFile {
                path: path.to_path_buf(),
                source,
            }
        });
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
