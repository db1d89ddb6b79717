//! Facade crate for the ScatterScore scoring engine.
//!
//! This crate re-exports the core domain types and exposes the default
//! scoring engine behind the `engine` feature flag.

#![forbid(unsafe_code)]

pub use scatterscore_core::{
    AxisConfig, AxisConfigError, AxisLabel, AxisMetricConfig, CompanyId, CompanyRecord,
    DEFAULT_NEW_METRIC_WEIGHT, FieldValue, Fields, GlobalRanges, ImputationMode, MetricCatalog,
    MetricDefinition, MetricUnit, NormalizationMode, PlotPoint, PlotScorer, ScoreRequest,
    ScoreRequestValidationError, ScoringTemplate, TemplateDefinition, WEIGHT_TOTAL, WeightEdit,
    ZScale, is_valid_number, rebalance,
};

#[cfg(feature = "engine")]
pub use scatterscore_engine::{MetricStatistics, ScoreEngine, StatisticsSource};
