//! Test-only builders and scorers used by unit and behaviour tests.

use crate::{AxisConfig, AxisMetricConfig, CompanyId, CompanyRecord, PlotPoint, PlotScorer, ScoreRequest};

/// Build one company per value, with ids counting up from 1.
///
/// `None` entries become explicit nulls at `path`.
#[must_use]
pub fn companies_with_values(path: &str, values: &[Option<f64>]) -> Vec<CompanyRecord> {
    (1..)
        .zip(values)
        .map(|(id, &value)| CompanyRecord::new(id).with_value(path, value))
        .collect()
}

/// Build an axis from `(key, weight, higher_is_better)` triples without rebalancing.
#[must_use]
pub fn axis_of(metrics: &[(&str, u8, bool)]) -> AxisConfig {
    metrics
        .iter()
        .map(|&(key, weight, higher)| AxisMetricConfig::new(key, weight, higher))
        .collect()
}

/// `PlotScorer` that places every company at the same coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedPlotScorer {
    /// X score assigned to every company.
    pub x_score: Option<f64>,
    /// Y score assigned to every company.
    pub y_score: Option<f64>,
}

impl Default for FixedPlotScorer {
    fn default() -> Self {
        Self {
            x_score: Some(0.5),
            y_score: Some(0.5),
        }
    }
}

impl PlotScorer for FixedPlotScorer {
    fn score(&self, request: &ScoreRequest) -> Vec<PlotPoint> {
        request
            .companies
            .iter()
            .map(|company| point(company.id, self.x_score, self.y_score))
            .collect()
    }
}

const fn point(company_id: CompanyId, x_score: Option<f64>, y_score: Option<f64>) -> PlotPoint {
    PlotPoint {
        company_id,
        x_score,
        y_score,
        z_value: None,
    }
}
