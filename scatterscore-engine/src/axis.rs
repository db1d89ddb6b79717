//! Blend normalised metric scores into one axis score.
#![forbid(unsafe_code)]

use scatterscore_core::{AxisConfig, AxisMetricConfig, PlotScorer};

use crate::ScoreEngine;

/// Weighted sum of the normalised scores on `axis`.
///
/// `normalized` is called once per selection, in axis order. Returns `None`
/// for an empty axis. Weights are read as shares of 100 and the result is
/// clamped to `0.0..=1.0`.
///
/// # Examples
/// ```
/// use scatterscore_core::{AxisConfig, AxisMetricConfig};
/// use scatterscore_engine::score_axis;
///
/// let axis = AxisConfig::from_metrics(vec![
///     AxisMetricConfig::new("market_cap", 60, true),
///     AxisMetricConfig::new("debt", 40, false),
/// ]);
/// let score = score_axis(&axis, |m| if m.metric_key == "market_cap" { 1.0 } else { 0.5 })
///     .expect("axis is configured");
/// assert!((score - 0.8).abs() < 1e-12);
/// assert_eq!(score_axis(&AxisConfig::new(), |_| 1.0), None);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the composite is a weighted sum of unit scores"
)]
pub fn score_axis<F>(axis: &AxisConfig, mut normalized: F) -> Option<f64>
where
    F: FnMut(&AxisMetricConfig) -> f64,
{
    if axis.is_empty() {
        return None;
    }
    let total: f64 = axis
        .metrics()
        .iter()
        .map(|metric| f64::from(metric.weight) / 100.0 * normalized(metric))
        .sum();
    Some(ScoreEngine::sanitise(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scatterscore_core::test_support::axis_of;

    #[rstest]
    fn single_metric_passes_through() {
        let axis = axis_of(&[("cash", 100, true)]);
        assert_eq!(score_axis(&axis, |_| 0.25), Some(0.25));
    }

    #[rstest]
    fn zero_weight_metrics_do_not_contribute() {
        let axis = axis_of(&[("cash", 100, true), ("debt", 0, false)]);
        let score = score_axis(&axis, |m| if m.metric_key == "cash" { 0.4 } else { 1.0 });
        assert_eq!(score, Some(0.4));
    }

    #[rstest]
    fn calls_lookup_in_axis_order() {
        let axis = axis_of(&[("a", 50, true), ("b", 30, true), ("c", 20, false)]);
        let mut seen = Vec::new();
        let _ = score_axis(&axis, |m| {
            seen.push(m.metric_key.clone());
            0.0
        });
        assert_eq!(seen, ["a", "b", "c"]);
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(2.0, 1.0)]
    fn out_of_range_composites_are_sanitised(#[case] normalized: f64, #[case] expected: f64) {
        let axis = axis_of(&[("a", 100, true)]);
        assert_eq!(score_axis(&axis, |_| normalized), Some(expected));
    }

    #[rstest]
    fn overweight_axis_is_clamped() {
        // The engine does not validate weights; an unbalanced axis still yields a unit score.
        let axis = axis_of(&[("a", 100, true), ("b", 100, true)]);
        assert_eq!(score_axis(&axis, |_| 1.0), Some(1.0));
    }
}
