//! Per-axis metric selections.
//!
//! An [`AxisConfig`] is the ordered list of metrics scored on one chart
//! axis. Edits made through its methods route through
//! [`rebalance`](crate::rebalance) so a non-empty axis always sums to 100.
//! Configurations built by hand can be checked with [`AxisConfig::validate`]
//! before a run.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::weights::{WEIGHT_TOTAL, WeightEdit, rebalance};
use crate::MetricDefinition;

/// One metric selected for an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisMetricConfig {
    /// Catalogue key of the metric.
    pub metric_key: String,
    /// Share of the axis score, `0..=100`.
    pub weight: u8,
    /// Whether larger raw values score higher on this axis.
    pub higher_is_better: bool,
}

impl AxisMetricConfig {
    /// Construct a metric selection.
    #[must_use]
    pub fn new(metric_key: impl Into<String>, weight: u8, higher_is_better: bool) -> Self {
        Self {
            metric_key: metric_key.into(),
            weight,
            higher_is_better,
        }
    }
}

/// Which chart axis a configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisLabel {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Errors returned by [`AxisConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AxisConfigError {
    /// The weights of a non-empty axis do not add up to 100.
    #[error("axis weights sum to {total}, expected 100")]
    WeightSum {
        /// Observed total.
        total: u32,
    },
    /// A metric appears more than once.
    #[error("metric '{key}' is selected more than once")]
    DuplicateMetric {
        /// Repeated metric key.
        key: String,
    },
    /// A weight is above 100.
    #[error("metric '{key}' has weight {weight}, expected 0..=100")]
    WeightOutOfRange {
        /// Offending metric key.
        key: String,
        /// Offending weight.
        weight: u8,
    },
}

/// Ordered metric selections for one axis.
///
/// # Examples
/// ```
/// use scatterscore_core::{AxisConfig, MetricCatalog};
///
/// let catalog = MetricCatalog::mining();
/// let mut axis = AxisConfig::new();
/// axis.add_metric(catalog.get("market_cap").unwrap());
/// axis.add_metric(catalog.get("aisc_last_year").unwrap());
/// assert_eq!(axis.total_weight(), 100);
/// assert!(axis.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AxisConfig {
    metrics: Vec<AxisMetricConfig>,
}

impl AxisConfig {
    /// Construct an empty axis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metrics: Vec::new(),
        }
    }

    /// Wrap existing selections without rebalancing them.
    #[must_use]
    pub const fn from_metrics(metrics: Vec<AxisMetricConfig>) -> Self {
        Self { metrics }
    }

    /// Borrow the selections in order.
    #[must_use]
    pub fn metrics(&self) -> &[AxisMetricConfig] {
        &self.metrics
    }

    /// Report whether no metric is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Return the number of selected metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Return the selection for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AxisMetricConfig> {
        self.metrics.iter().find(|m| m.metric_key == key)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.metrics.iter().map(|m| u32::from(m.weight)).sum()
    }

    /// Append a metric with its catalogue direction and rebalance.
    ///
    /// Adding a metric that is already selected leaves the axis unchanged.
    pub fn add_metric(&mut self, definition: &MetricDefinition) {
        if self.get(&definition.key).is_some() {
            return;
        }
        self.metrics.push(AxisMetricConfig::new(
            definition.key.clone(),
            0,
            definition.default_higher_is_better,
        ));
        let edit = WeightEdit::Added {
            metric_key: definition.key.clone(),
        };
        self.metrics = rebalance(&self.metrics, Some(&edit));
    }

    /// Remove a metric and renormalise the rest; returns whether it was present.
    pub fn remove_metric(&mut self, key: &str) -> bool {
        let before = self.metrics.len();
        self.metrics.retain(|m| m.metric_key != key);
        let removed = self.metrics.len() != before;
        if removed {
            self.metrics = rebalance(&self.metrics, None);
        }
        removed
    }

    /// Pin a metric's weight and rescale the others; returns whether it was present.
    pub fn set_weight(&mut self, key: &str, weight: f64) -> bool {
        if self.get(key).is_none() {
            return false;
        }
        let edit = WeightEdit::Reweighted {
            metric_key: key.to_owned(),
            weight,
        };
        self.metrics = rebalance(&self.metrics, Some(&edit));
        true
    }

    /// Change a metric's direction; returns whether it was present.
    pub fn set_higher_is_better(&mut self, key: &str, higher_is_better: bool) -> bool {
        let Some(metric) = self.metrics.iter_mut().find(|m| m.metric_key == key) else {
            return false;
        };
        metric.higher_is_better = higher_is_better;
        true
    }

    /// Check the invariants a caller must establish before a scoring run.
    ///
    /// # Errors
    /// Returns [`AxisConfigError`] for duplicated metrics, weights above 100,
    /// or a non-empty axis whose weights do not sum to 100.
    pub fn validate(&self) -> Result<(), AxisConfigError> {
        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.metric_key.as_str()) {
                return Err(AxisConfigError::DuplicateMetric {
                    key: metric.metric_key.clone(),
                });
            }
            if metric.weight > WEIGHT_TOTAL {
                return Err(AxisConfigError::WeightOutOfRange {
                    key: metric.metric_key.clone(),
                    weight: metric.weight,
                });
            }
        }
        let total = self.total_weight();
        if !self.is_empty() && total != u32::from(WEIGHT_TOTAL) {
            return Err(AxisConfigError::WeightSum { total });
        }
        Ok(())
    }
}

impl FromIterator<AxisMetricConfig> for AxisConfig {
    fn from_iter<I: IntoIterator<Item = AxisMetricConfig>>(iter: I) -> Self {
        Self::from_metrics(iter.into_iter().collect())
    }
}
