//! Score command implementation for the ScatterScore CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use scatterscore_core::{
    AxisConfig, GlobalRanges, ImputationMode, NormalizationMode, PlotPoint, PlotScorer,
    ScoreRequest, ScoringTemplate, ZScale,
};
use scatterscore_engine::ScoreEngine;

use crate::{
    ARG_OUTPUT, ARG_SCORE_GLOBAL_RANGES, ARG_SCORE_IMPUTATION, ARG_SCORE_NORMALIZATION,
    ARG_SCORE_REQUEST, ARG_SCORE_TEMPLATE, CliError, ENV_SCORE_REQUEST, load_json,
    require_existing, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a JSON-encoded ScoreRequest into one plot point per \
                 company. A template replaces the request's axes and modes; \
                 explicit --normalization and --imputation flags win over \
                 both. Global ranges are read from a separate JSON object \
                 keyed by metric.",
    about = "Score companies onto chart coordinates"
)]
#[ortho_config(prefix = "SCATTERSCORE")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing a ScoreRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Override the request's normalisation mode.
    #[arg(long = ARG_SCORE_NORMALIZATION, value_name = "mode")]
    #[serde(default)]
    pub(crate) normalization: Option<NormalizationMode>,
    /// Override the request's imputation mode.
    #[arg(long = ARG_SCORE_IMPUTATION, value_name = "mode")]
    #[serde(default)]
    pub(crate) imputation: Option<ImputationMode>,
    /// Apply a built-in scoring template before the overrides.
    #[arg(long = ARG_SCORE_TEMPLATE, value_name = "name")]
    #[serde(default)]
    pub(crate) template: Option<ScoringTemplate>,
    /// JSON object of `metric -> [min, max]` used by global-min-max.
    #[arg(long = ARG_SCORE_GLOBAL_RANGES, value_name = "path")]
    #[serde(default)]
    pub(crate) global_ranges: Option<Utf8PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) normalization: Option<NormalizationMode>,
    pub(crate) imputation: Option<ImputationMode>,
    pub(crate) template: Option<ScoringTemplate>,
    /// Path to a global range table, replacing the request's own.
    pub(crate) global_ranges: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SCORE_REQUEST)?;
        if let Some(path) = &self.global_ranges {
            require_existing(path, ARG_SCORE_GLOBAL_RANGES)?;
        }
        Ok(())
    }

    /// Apply the template, range table and mode overrides to `request`.
    pub(crate) fn apply_overrides(
        &self,
        request: &mut ScoreRequest,
        global_ranges: Option<GlobalRanges>,
    ) {
        if let Some(template) = self.template {
            debug!("applying template {template}");
            request.apply_template(template);
        }
        if let Some(normalization) = self.normalization {
            request.normalization = normalization;
        }
        if let Some(imputation) = self.imputation {
            request.imputation = imputation;
        }
        if let Some(ranges) = global_ranges {
            request.global_ranges = ranges;
        }
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_REQUEST,
            env: ENV_SCORE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            normalization: args.normalization,
            imputation: args.imputation,
            template: args.template,
            global_ranges: args.global_ranges,
            output: args.output,
        })
    }
}

/// Report written by the `score` command.
///
/// Echoes the effective configuration alongside the points so a chart layer
/// can label axes and scale bubbles without re-reading the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreReport {
    pub(crate) points: Vec<PlotPoint>,
    pub(crate) x_axis: AxisConfig,
    pub(crate) y_axis: AxisConfig,
    pub(crate) z_metric: Option<String>,
    pub(crate) z_scale: ZScale,
    pub(crate) normalization: NormalizationMode,
    pub(crate) imputation: ImputationMode,
}

impl ScoreReport {
    fn new(request: ScoreRequest, points: Vec<PlotPoint>) -> Self {
        Self {
            points,
            x_axis: request.x_axis,
            y_axis: request.y_axis,
            z_metric: request.z_metric,
            z_scale: request.z_scale,
            normalization: request.normalization,
            imputation: request.imputation,
        }
    }
}

/// Builds a scorer for the current score invocation.
pub(super) trait ScoreScorerBuilder {
    fn build(&self, config: &ScoreConfig) -> Result<Box<dyn PlotScorer>, CliError>;
}

pub(super) struct DefaultScoreScorerBuilder;

impl ScoreScorerBuilder for DefaultScoreScorerBuilder {
    fn build(&self, _config: &ScoreConfig) -> Result<Box<dyn PlotScorer>, CliError> {
        Ok(Box::new(ScoreEngine::mining()))
    }
}

pub(super) fn run_score(args: ScoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultScoreScorerBuilder;
    run_score_with(args, &builder, &mut stdout)
}

pub(super) fn run_score_with(
    args: ScoreArgs,
    builder: &dyn ScoreScorerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_score_config(args)?;
    let report = execute_score(&config, builder)?;
    write_json(&report, config.output.as_deref(), writer)
}

fn resolve_score_config(args: ScoreArgs) -> Result<ScoreConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_score(
    config: &ScoreConfig,
    builder: &dyn ScoreScorerBuilder,
) -> Result<ScoreReport, CliError> {
    let mut request = load_score_request(&config.request_path)?;
    let global_ranges = config
        .global_ranges
        .as_deref()
        .map(|path| load_json::<GlobalRanges>(path, ARG_SCORE_GLOBAL_RANGES))
        .transpose()?;
    config.apply_overrides(&mut request, global_ranges);
    request
        .validate_detailed()
        .map_err(|source| CliError::InvalidScoreRequest {
            path: config.request_path.clone(),
            source,
        })?;
    if request.normalization.uses_global_ranges() && request.global_ranges.is_empty() {
        warn!(
            "{} normalisation without global ranges scores every metric neutrally",
            request.normalization
        );
    }
    let scorer = builder.build(config)?;
    let points = scorer.score(&request);
    let plottable = points.iter().filter(|point| point.is_plottable()).count();
    info!("scored {} companies, {plottable} plottable", points.len());
    Ok(ScoreReport::new(request, points))
}

/// Loads a JSON-encoded [`ScoreRequest`] from disk.
pub(super) fn load_score_request(path: &Utf8Path) -> Result<ScoreRequest, CliError> {
    load_json(path, ARG_SCORE_REQUEST)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
