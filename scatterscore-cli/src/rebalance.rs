//! Rebalance command implementation for the ScatterScore CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use scatterscore_core::{AxisConfig, MetricCatalog};

use crate::{
    ARG_OUTPUT, ARG_REBALANCE_ADD, ARG_REBALANCE_AXIS, ARG_REBALANCE_REMOVE, ARG_REBALANCE_SET,
    ARG_REBALANCE_WEIGHT, CliError, ENV_REBALANCE_AXIS, load_json, require_existing, write_json,
};

/// CLI arguments for the `rebalance` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a JSON axis (an array of metric_key, weight and \
                 higher_is_better entries), apply a single edit and print \
                 the axis with its weights rebalanced to sum to 100.",
    about = "Edit an axis and rebalance its weights"
)]
#[ortho_config(prefix = "SCATTERSCORE")]
pub(crate) struct RebalanceArgs {
    /// Path to a JSON file containing an axis configuration.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) axis_path: Option<Utf8PathBuf>,
    /// Add a catalogue metric at the default weight.
    #[arg(long = ARG_REBALANCE_ADD, value_name = "metric")]
    #[serde(default)]
    pub(crate) add: Option<String>,
    /// Remove a metric and renormalise the rest.
    #[arg(long = ARG_REBALANCE_REMOVE, value_name = "metric")]
    #[serde(default)]
    pub(crate) remove: Option<String>,
    /// Pin a metric to `--weight`.
    #[arg(long = ARG_REBALANCE_SET, value_name = "metric")]
    #[serde(default)]
    pub(crate) set: Option<String>,
    /// Weight for `--set`, clamped to 0..=100.
    #[arg(long = ARG_REBALANCE_WEIGHT, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) weight: Option<f64>,
    /// Write the axis here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RebalanceArgs {
    pub(crate) fn into_config(self) -> Result<RebalanceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RebalanceConfig::try_from(merged)
    }
}

/// One edit applied to an axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AxisEdit {
    Add(String),
    Remove(String),
    Set { key: String, weight: f64 },
}

impl AxisEdit {
    /// Apply the edit, resolving added metrics against `catalog`.
    pub(crate) fn apply(
        &self,
        axis: &mut AxisConfig,
        catalog: &MetricCatalog,
    ) -> Result<(), CliError> {
        let applied = match self {
            Self::Add(key) => {
                let definition = catalog
                    .get(key)
                    .ok_or_else(|| CliError::UnknownMetric { key: key.clone() })?;
                if axis.get(key).is_some() {
                    debug!("metric {key} is already on the axis");
                }
                axis.add_metric(definition);
                true
            }
            Self::Remove(key) => axis.remove_metric(key),
            Self::Set { key, weight } => axis.set_weight(key, *weight),
        };
        if applied {
            Ok(())
        } else {
            Err(CliError::MetricNotOnAxis {
                key: self.key().to_owned(),
            })
        }
    }

    fn key(&self) -> &str {
        match self {
            Self::Add(key) | Self::Remove(key) | Self::Set { key, .. } => key,
        }
    }
}

/// Resolved `rebalance` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RebalanceConfig {
    pub(crate) axis_path: Utf8PathBuf,
    pub(crate) edit: AxisEdit,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RebalanceArgs> for RebalanceConfig {
    type Error = CliError;

    fn try_from(args: RebalanceArgs) -> Result<Self, Self::Error> {
        let axis_path = args.axis_path.ok_or(CliError::MissingArgument {
            field: ARG_REBALANCE_AXIS,
            env: ENV_REBALANCE_AXIS,
        })?;
        let edit = match (args.add, args.remove, args.set) {
            (Some(key), None, None) => AxisEdit::Add(key),
            (None, Some(key), None) => AxisEdit::Remove(key),
            (None, None, Some(key)) => {
                let Some(weight) = args.weight else {
                    return Err(CliError::MissingWeight { key });
                };
                AxisEdit::Set { key, weight }
            }
            _ => return Err(CliError::AmbiguousEdit),
        };
        Ok(Self {
            axis_path,
            edit,
            output: args.output,
        })
    }
}

pub(super) fn run_rebalance(args: RebalanceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rebalance_with(args, &MetricCatalog::mining(), &mut stdout)
}

pub(super) fn run_rebalance_with(
    args: RebalanceArgs,
    catalog: &MetricCatalog,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.axis_path, ARG_REBALANCE_AXIS)?;
    let mut axis: AxisConfig = load_json(&config.axis_path, ARG_REBALANCE_AXIS)?;
    config.edit.apply(&mut axis, catalog)?;
    debug!(
        "axis now holds {} metrics totalling {}",
        axis.len(),
        axis.total_weight()
    );
    write_json(&axis, config.output.as_deref(), writer)
}
