//! Core domain types for the ScatterScore engine.
//!
//! The crate holds everything a scoring run is configured with, and the pure
//! logic that keeps that configuration consistent:
//! - the [`MetricCatalog`] of scoreable metrics and their field paths;
//! - per-axis selections ([`AxisConfig`]) and the weight [`rebalance`]r that
//!   keeps each non-empty axis summing to 100;
//! - the [`NormalizationMode`], [`ImputationMode`] and [`ZScale`] selections;
//! - [`CompanyRecord`] inputs, the [`ScoreRequest`] snapshot and the
//!   [`PlotPoint`] outputs;
//! - named [`ScoringTemplate`] presets;
//! - the [`PlotScorer`] trait implemented by the engine crate.
//!
//! Nothing here performs I/O or holds state between runs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod axis;
mod company;
mod metric;
mod mode;
mod plot;
mod request;
mod scorer;
mod template;
mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use axis::{AxisConfig, AxisConfigError, AxisLabel, AxisMetricConfig};
pub use company::{CompanyId, CompanyRecord, FieldValue, Fields};
pub use metric::{MetricCatalog, MetricDefinition, MetricUnit};
pub use mode::{ImputationMode, NormalizationMode, ZScale};
pub use plot::{PlotPoint, is_valid_number};
pub use request::{GlobalRanges, ScoreRequest, ScoreRequestValidationError};
pub use scorer::PlotScorer;
pub use template::{ScoringTemplate, TemplateDefinition};
pub use weights::{DEFAULT_NEW_METRIC_WEIGHT, WEIGHT_TOTAL, WeightEdit, rebalance};
