//! Substitute missing raw values before normalisation.
#![forbid(unsafe_code)]

use scatterscore_core::ImputationMode;

use crate::MetricStatistics;

/// Return `raw`, or a substitute chosen by `mode` when it is missing.
///
/// `ZeroOrWorst` picks the raw bound that normalises to the worst score for
/// the metric's direction: `min` when higher is better, `max` otherwise.
/// Every mode falls back to zero when the statistics carry no information.
///
/// # Examples
/// ```
/// use scatterscore_core::ImputationMode;
/// use scatterscore_engine::{MetricStatistics, impute};
///
/// let stats = MetricStatistics::from_values([10.0, 20.0, 60.0]);
/// assert_eq!(impute(Some(5.0), &stats, ImputationMode::DatasetMean, true), 5.0);
/// assert_eq!(impute(None, &stats, ImputationMode::DatasetMean, true), 30.0);
/// assert_eq!(impute(None, &stats, ImputationMode::ZeroOrWorst, false), 60.0);
/// ```
#[must_use]
pub fn impute(
    raw: Option<f64>,
    stats: &MetricStatistics,
    mode: ImputationMode,
    higher_is_better: bool,
) -> f64 {
    if let Some(value) = raw {
        return value;
    }
    if stats.is_degenerate() {
        return 0.0;
    }
    match mode {
        ImputationMode::ZeroOrWorst if higher_is_better => stats.min,
        ImputationMode::ZeroOrWorst => stats.max,
        ImputationMode::DatasetMean if stats.sorted_values.is_empty() => 0.0,
        ImputationMode::DatasetMean => stats.mean,
        ImputationMode::DatasetMedian => stats.median().unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stats() -> MetricStatistics {
        MetricStatistics::from_values([1.0, 2.0, 3.0, 10.0])
    }

    #[rstest]
    #[case(ImputationMode::ZeroOrWorst)]
    #[case(ImputationMode::DatasetMean)]
    #[case(ImputationMode::DatasetMedian)]
    fn present_values_pass_through(stats: MetricStatistics, #[case] mode: ImputationMode) {
        assert_eq!(impute(Some(-7.5), &stats, mode, true), -7.5);
    }

    #[rstest]
    #[case(ImputationMode::ZeroOrWorst, true, 1.0)]
    #[case(ImputationMode::ZeroOrWorst, false, 10.0)]
    #[case(ImputationMode::DatasetMean, true, 4.0)]
    #[case(ImputationMode::DatasetMedian, false, 2.5)]
    fn missing_values_are_imputed(
        stats: MetricStatistics,
        #[case] mode: ImputationMode,
        #[case] higher_is_better: bool,
        #[case] expected: f64,
    ) {
        assert_eq!(impute(None, &stats, mode, higher_is_better), expected);
    }

    #[rstest]
    #[case(ImputationMode::ZeroOrWorst)]
    #[case(ImputationMode::DatasetMean)]
    #[case(ImputationMode::DatasetMedian)]
    fn degenerate_statistics_impute_zero(#[case] mode: ImputationMode) {
        let stats = MetricStatistics::degenerate();
        assert_eq!(impute(None, &stats, mode, true), 0.0);
    }

    #[rstest]
    fn global_range_without_dataset_values_uses_bounds_and_zero() {
        let stats = MetricStatistics::from_values([]).with_global_range((5.0, 50.0));
        assert_eq!(impute(None, &stats, ImputationMode::ZeroOrWorst, true), 5.0);
        assert_eq!(impute(None, &stats, ImputationMode::DatasetMean, true), 0.0);
        assert_eq!(impute(None, &stats, ImputationMode::DatasetMedian, true), 0.0);
    }
}
