//! Per-metric statistics resolved once per run.
#![forbid(unsafe_code)]

use log::{debug, warn};
use scatterscore_core::{CompanyRecord, GlobalRanges, MetricCatalog, NormalizationMode};

use crate::extract;

/// Where a [`MetricStatistics`] got its range from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsSource {
    /// Present values of the current company set.
    Dataset,
    /// The caller's global range table, with dataset moments.
    Global,
    /// No information: no present values, or no global entry.
    Empty,
}

/// Range and moments of one metric.
///
/// `min`/`max` bound the normaliser; `mean`, `stddev` and `sorted_values`
/// always describe the present values of the company set.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricStatistics {
    /// Lower bound of the range.
    pub min: f64,
    /// Upper bound of the range.
    pub max: f64,
    /// Mean of the present values.
    pub mean: f64,
    /// Population standard deviation of the present values.
    pub stddev: f64,
    /// Present values in ascending order.
    pub sorted_values: Vec<f64>,
    /// Origin of the range.
    pub source: StatisticsSource,
}

impl MetricStatistics {
    /// Statistics carrying no information.
    #[must_use]
    pub const fn degenerate() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            stddev: 0.0,
            sorted_values: Vec::new(),
            source: StatisticsSource::Empty,
        }
    }

    /// Compute statistics from present values; non-finite values are skipped.
    ///
    /// # Examples
    /// ```
    /// use scatterscore_engine::MetricStatistics;
    ///
    /// let stats = MetricStatistics::from_values([30.0, 10.0, 20.0]);
    /// assert_eq!((stats.min, stats.max, stats.mean), (10.0, 30.0, 20.0));
    /// assert_eq!(stats.sorted_values, vec![10.0, 20.0, 30.0]);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "moments require floating-point sums over the value count"
    )]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted_values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted_values.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self::degenerate();
        };
        let count = sorted_values.len() as f64;
        let mean = sorted_values.iter().sum::<f64>() / count;
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / count;
        Self {
            min,
            max,
            mean,
            stddev: variance.sqrt(),
            sorted_values,
            source: StatisticsSource::Dataset,
        }
    }

    /// Replace the range with a global `(min, max)` pair, keeping the moments.
    #[must_use]
    pub fn with_global_range(self, (min, max): (f64, f64)) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            source: StatisticsSource::Global,
            ..self
        }
    }

    /// Report whether the statistics carry no information.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.source == StatisticsSource::Empty
    }

    /// Median of the present values, if any.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "the median averages the two central values of an even set"
    )]
    pub fn median(&self) -> Option<f64> {
        let len = self.sorted_values.len();
        let upper = self.sorted_values.get(len / 2).copied()?;
        if len % 2 == 1 {
            return Some(upper);
        }
        let lower = self.sorted_values.get(len / 2 - 1).copied()?;
        Some((lower + upper) / 2.0)
    }
}

/// Resolve statistics for metrics over a company set.
#[derive(Debug, Clone, Copy)]
pub struct RangeResolver<'a> {
    catalog: &'a MetricCatalog,
    global_ranges: &'a GlobalRanges,
}

impl<'a> RangeResolver<'a> {
    /// Construct a resolver reading field paths from `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a MetricCatalog, global_ranges: &'a GlobalRanges) -> Self {
        Self {
            catalog,
            global_ranges,
        }
    }

    /// Compute the statistics `mode` needs for `metric_key`.
    ///
    /// Dataset modes use the present values of `companies`. `GlobalMinMax`
    /// takes its range from the global table and falls back to degenerate
    /// statistics when the metric has no entry.
    #[must_use]
    pub fn resolve(
        &self,
        companies: &[CompanyRecord],
        metric_key: &str,
        mode: NormalizationMode,
    ) -> MetricStatistics {
        let path = self.catalog.field_path(metric_key);
        let dataset = MetricStatistics::from_values(
            companies.iter().filter_map(|company| extract(company, path)),
        );
        let stats = if mode.uses_global_ranges() {
            self.global_ranges
                .get(metric_key)
                .filter(|(min, max)| min.is_finite() && max.is_finite())
                .map_or_else(MetricStatistics::degenerate, |range| {
                    dataset.with_global_range(range)
                })
        } else {
            dataset
        };
        if stats.is_degenerate() {
            warn!("metric {metric_key} has no usable range; scoring it neutrally");
        } else {
            debug!(
                "metric {metric_key}: min={} max={} mean={} stddev={} present={}",
                stats.min,
                stats.max,
                stats.mean,
                stats.stddev,
                stats.sorted_values.len()
            );
        }
        stats
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare moments within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scatterscore_core::test_support::companies_with_values;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    fn computes_population_moments() {
        let stats = MetricStatistics::from_values([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < TOLERANCE);
        assert!((stats.stddev - 2.0).abs() < TOLERANCE);
        assert_eq!(stats.source, StatisticsSource::Dataset);
    }

    #[rstest]
    fn empty_values_are_degenerate() {
        let stats = MetricStatistics::from_values([f64::NAN]);
        assert!(stats.is_degenerate());
        assert_eq!(stats, MetricStatistics::degenerate());
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[3.0], Some(3.0))]
    #[case(&[1.0, 9.0, 5.0], Some(5.0))]
    #[case(&[4.0, 1.0, 3.0, 2.0], Some(2.5))]
    fn medians(#[case] values: &[f64], #[case] expected: Option<f64>) {
        let stats = MetricStatistics::from_values(values.iter().copied());
        assert_eq!(stats.median(), expected);
    }

    #[rstest]
    fn dataset_resolution_skips_missing_values() {
        let catalog = MetricCatalog::default();
        let ranges = GlobalRanges::new();
        let companies = companies_with_values("m", &[Some(10.0), None, Some(30.0)]);
        let stats = RangeResolver::new(&catalog, &ranges).resolve(
            &companies,
            "m",
            NormalizationMode::DatasetMinMax,
        );
        assert_eq!((stats.min, stats.max), (10.0, 30.0));
        assert_eq!(stats.sorted_values, vec![10.0, 30.0]);
    }

    #[rstest]
    fn global_resolution_uses_table_range() {
        let catalog = MetricCatalog::default();
        let ranges = GlobalRanges::new().with_range("m", 0.0, 100.0);
        let companies = companies_with_values("m", &[Some(10.0), Some(30.0)]);
        let stats = RangeResolver::new(&catalog, &ranges).resolve(
            &companies,
            "m",
            NormalizationMode::GlobalMinMax,
        );
        assert_eq!((stats.min, stats.max), (0.0, 100.0));
        assert!((stats.mean - 20.0).abs() < TOLERANCE);
        assert_eq!(stats.source, StatisticsSource::Global);
    }

    #[rstest]
    fn global_resolution_without_entry_is_degenerate() {
        let catalog = MetricCatalog::default();
        let ranges = GlobalRanges::new();
        let companies = companies_with_values("m", &[Some(10.0)]);
        let stats = RangeResolver::new(&catalog, &ranges).resolve(
            &companies,
            "m",
            NormalizationMode::GlobalMinMax,
        );
        assert!(stats.is_degenerate());
    }

    #[rstest]
    fn reversed_global_range_is_reordered() {
        let stats = MetricStatistics::from_values([1.0]).with_global_range((9.0, 3.0));
        assert_eq!((stats.min, stats.max), (3.0, 9.0));
    }

    #[rstest]
    fn catalogue_paths_are_followed() {
        let catalog = MetricCatalog::mining();
        let ranges = GlobalRanges::new();
        let companies =
            companies_with_values("financials.cash_value", &[Some(1.0), Some(3.0)]);
        let stats = RangeResolver::new(&catalog, &ranges).resolve(
            &companies,
            "cash",
            NormalizationMode::DatasetZScore,
        );
        assert!((stats.mean - 2.0).abs() < TOLERANCE);
        assert!((stats.stddev - 1.0).abs() < TOLERANCE);
    }
}
