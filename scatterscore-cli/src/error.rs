//! Error types emitted by the ScatterScore CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use scatterscore_core::ScoreRequestValidationError;
use thiserror::Error;

/// Errors emitted by the ScatterScore CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the offending option or input.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not decode as the expected JSON document.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The score request failed validation after overrides were applied.
    #[error("score request in {path:?} failed validation: {source}")]
    InvalidScoreRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: ScoreRequestValidationError,
    },
    /// The rebalance command needs exactly one edit.
    #[error("choose exactly one of --add, --remove or --set")]
    AmbiguousEdit,
    /// `--set` was given without `--weight`.
    #[error("--set {key} needs --weight")]
    MissingWeight {
        /// Metric key named by the user.
        key: String,
    },
    /// The metric is not in the catalogue, so it has no default direction.
    #[error("unknown metric '{key}'")]
    UnknownMetric {
        /// Metric key named by the user.
        key: String,
    },
    /// The edit names a metric the axis does not contain.
    #[error("metric '{key}' is not on the axis")]
    MetricNotOnAxis {
        /// Metric key named by the user.
        key: String,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the output file failed.
    #[error("failed to write output to {path:?}: {source}")]
    WriteOutputFile {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
