//! Scoring engine for ScatterScore plot points.
//!
//! A run moves every company through four stages:
//! - **Range resolution** computes per-metric [`MetricStatistics`] once per
//!   run, from the company set or from caller-supplied global ranges.
//! - **Imputation** substitutes missing raw values according to the
//!   request's [`ImputationMode`](scatterscore_core::ImputationMode).
//! - **Normalisation** maps raw values into `0.0..=1.0`, flipping
//!   lower-is-better metrics so 1.0 is always best.
//! - **Axis scoring** blends normalised values with the axis weights.
//!
//! [`ScoreEngine`] implements [`PlotScorer`](scatterscore_core::PlotScorer)
//! and is total: absent data never fails a run.
//!
//! # Examples
//!
//! ```
//! use scatterscore_core::{
//!     AxisConfig, AxisMetricConfig, CompanyRecord, NormalizationMode, PlotScorer, ScoreRequest,
//! };
//! use scatterscore_engine::ScoreEngine;
//!
//! let companies = [120.0, 80.0, 100.0]
//!     .into_iter()
//!     .zip(1..)
//!     .map(|(aisc, id)| CompanyRecord::new(id).with_value("costs.aisc_last_year", aisc))
//!     .collect();
//! let request = ScoreRequest {
//!     companies,
//!     y_axis: AxisConfig::from_metrics(vec![AxisMetricConfig::new("aisc_last_year", 100, false)]),
//!     normalization: NormalizationMode::DatasetMinMax,
//!     ..ScoreRequest::default()
//! };
//! let scores: Vec<_> = ScoreEngine::mining()
//!     .score(&request)
//!     .into_iter()
//!     .map(|point| point.y_score)
//!     .collect();
//! assert_eq!(scores, [Some(0.0), Some(1.0), Some(0.5)]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod axis;
mod engine;
mod extract;
mod impute;
mod normalize;
mod stats;

pub use axis::score_axis;
pub use engine::{ScoreEngine, StatisticsTable};
pub use extract::extract;
pub use impute::impute;
pub use normalize::{NEUTRAL_SCORE, Z_SCORE_CLAMP, normalize};
pub use stats::{MetricStatistics, RangeResolver, StatisticsSource};
