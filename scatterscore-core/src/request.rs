//! The snapshot a scoring run is computed from.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{AxisConfig, AxisConfigError, AxisLabel, CompanyRecord, ImputationMode, NormalizationMode, ZScale};

/// Precomputed all-companies `[min, max]` per metric key.
///
/// # Examples
/// ```
/// use scatterscore_core::GlobalRanges;
///
/// let ranges = GlobalRanges::new().with_range("market_cap", 1.0e6, 5.0e10);
/// assert_eq!(ranges.get("market_cap"), Some((1.0e6, 5.0e10)));
/// assert!(ranges.get("cash").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GlobalRanges {
    ranges: BTreeMap<String, (f64, f64)>,
}

impl GlobalRanges {
    /// Construct an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    /// Insert or replace the range for `metric_key`.
    pub fn insert(&mut self, metric_key: impl Into<String>, min: f64, max: f64) {
        self.ranges.insert(metric_key.into(), (min, max));
    }

    /// Add a range while returning `self` for chaining.
    #[must_use]
    pub fn with_range(mut self, metric_key: impl Into<String>, min: f64, max: f64) -> Self {
        self.insert(metric_key, min, max);
        self
    }

    /// Return the `(min, max)` pair for `metric_key`, if present.
    #[must_use]
    pub fn get(&self, metric_key: &str) -> Option<(f64, f64)> {
        self.ranges.get(metric_key).copied()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Everything one scoring run reads.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreRequest {
    /// Companies to place on the chart, already currency-normalised.
    pub companies: Vec<CompanyRecord>,
    /// Metrics blended into the X score.
    pub x_axis: AxisConfig,
    /// Metrics blended into the Y score.
    pub y_axis: AxisConfig,
    /// Metric copied raw into each point's Z value.
    pub z_metric: Option<String>,
    /// Bubble scale for the chart layer; not applied by the engine.
    pub z_scale: ZScale,
    /// Normalisation strategy shared by both axes.
    pub normalization: NormalizationMode,
    /// Missing-value policy shared by both axes.
    pub imputation: ImputationMode,
    /// Ranges read by [`NormalizationMode::GlobalMinMax`].
    pub global_ranges: GlobalRanges,
}

/// Errors returned by [`ScoreRequest::validate_detailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreRequestValidationError {
    /// Neither axis has any metric selected.
    #[error("at least one axis must have a metric selected")]
    NoAxisConfigured,
    /// An axis failed validation.
    #[error("{axis} axis is invalid: {source}")]
    Axis {
        /// Axis that failed.
        axis: AxisLabel,
        /// Underlying axis error.
        #[source]
        source: AxisConfigError,
    },
}

impl ScoreRequest {
    /// Check the request before handing it to a scorer.
    ///
    /// Scorers do not re-validate; this is the caller's gate.
    ///
    /// # Errors
    /// Returns [`ScoreRequestValidationError`] when both axes are empty or an
    /// axis breaks its invariants.
    pub fn validate_detailed(&self) -> Result<(), ScoreRequestValidationError> {
        if self.x_axis.is_empty() && self.y_axis.is_empty() {
            return Err(ScoreRequestValidationError::NoAxisConfigured);
        }
        for (axis, config) in [(AxisLabel::X, &self.x_axis), (AxisLabel::Y, &self.y_axis)] {
            config
                .validate()
                .map_err(|source| ScoreRequestValidationError::Axis { axis, source })?;
        }
        Ok(())
    }

    /// Report whether [`Self::validate_detailed`] succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate_detailed().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AxisMetricConfig;
    use rstest::rstest;

    fn axis(weights: &[(&str, u8)]) -> AxisConfig {
        weights
            .iter()
            .map(|&(key, weight)| AxisMetricConfig::new(key, weight, true))
            .collect()
    }

    #[rstest]
    fn request_without_axes_is_rejected() {
        let request = ScoreRequest::default();
        assert_eq!(
            request.validate_detailed(),
            Err(ScoreRequestValidationError::NoAxisConfigured)
        );
    }

    #[rstest]
    fn single_axis_is_enough() {
        let request = ScoreRequest {
            x_axis: axis(&[("cash", 100)]),
            ..ScoreRequest::default()
        };
        assert!(request.is_valid());
    }

    #[rstest]
    fn broken_axis_is_labelled() {
        let request = ScoreRequest {
            x_axis: axis(&[("cash", 100)]),
            y_axis: axis(&[("debt", 40), ("revenue", 40)]),
            ..ScoreRequest::default()
        };
        let err = request.validate_detailed().expect_err("weights sum to 80");
        assert_eq!(
            err,
            ScoreRequestValidationError::Axis {
                axis: AxisLabel::Y,
                source: AxisConfigError::WeightSum { total: 80 },
            }
        );
        assert_eq!(err.to_string(), "y axis is invalid: axis weights sum to 80, expected 100");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{
            "companies": [{ "company_id": 1 }],
            "x_axis": [{ "metric_key": "cash", "weight": 100, "higher_is_better": true }],
            "normalization": "dataset-rank-percentile",
            "global_ranges": { "cash": [0.0, 10.0] }
        }"#;
        let request: ScoreRequest = serde_json::from_str(json).expect("valid request");
        assert_eq!(request.companies.len(), 1);
        assert!(request.y_axis.is_empty());
        assert_eq!(request.normalization, NormalizationMode::DatasetRankPercentile);
        assert_eq!(request.imputation, ImputationMode::ZeroOrWorst);
        assert_eq!(request.global_ranges.get("cash"), Some((0.0, 10.0)));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn array_fields_do_not_reject_the_request() {
        let json = r#"{
            "companies": [
                { "company_id": 1, "financials": { "cash_value": 5.0 } },
                { "company_id": 2, "mines": [{ "name": "x" }], "tickers": ["ABC"] }
            ],
            "x_axis": [{ "metric_key": "cash", "weight": 100, "higher_is_better": true }]
        }"#;
        let request: ScoreRequest = serde_json::from_str(json).expect("valid request");
        let ids: Vec<_> = request.companies.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
