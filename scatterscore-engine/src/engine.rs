//! Orchestrate a scoring run over a company set.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use log::debug;
use scatterscore_core::{
    AxisConfig, AxisMetricConfig, CompanyRecord, MetricCatalog, PlotPoint, PlotScorer,
    ScoreRequest,
};

use crate::{MetricStatistics, RangeResolver, extract, impute, normalize, score_axis};

static DEGENERATE: MetricStatistics = MetricStatistics::degenerate();

/// Statistics keyed by metric, resolved once per run.
pub type StatisticsTable = BTreeMap<String, MetricStatistics>;

/// Default [`PlotScorer`] implementation.
///
/// Resolves each distinct metric of the request once, then scores every
/// company by extraction, imputation, normalisation and weighting. The
/// engine holds no state between runs; the catalogue only maps metric keys
/// to field paths. The default engine has an empty catalogue, so metric keys
/// are read as field paths directly.
///
/// # Examples
/// ```
/// use scatterscore_core::{AxisConfig, AxisMetricConfig, CompanyRecord, PlotScorer, ScoreRequest};
/// use scatterscore_engine::ScoreEngine;
///
/// let request = ScoreRequest {
///     companies: vec![
///         CompanyRecord::new(1).with_value("cash", 10.0),
///         CompanyRecord::new(2).with_value("cash", 30.0),
///     ],
///     x_axis: AxisConfig::from_metrics(vec![AxisMetricConfig::new("cash", 100, true)]),
///     ..ScoreRequest::default()
/// };
/// let points = ScoreEngine::default().score(&request);
/// assert_eq!(points[1].x_score, Some(1.0));
/// assert_eq!(points[1].y_score, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    catalog: MetricCatalog,
}

impl ScoreEngine {
    /// Construct an engine reading field paths from `catalog`.
    #[must_use]
    pub const fn new(catalog: MetricCatalog) -> Self {
        Self { catalog }
    }

    /// Construct an engine over the mining metric catalogue.
    #[must_use]
    pub fn mining() -> Self {
        Self::new(MetricCatalog::mining())
    }

    /// Borrow the catalogue used to resolve field paths.
    #[must_use]
    pub const fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Resolve statistics for every metric on either axis and the Z metric.
    #[must_use]
    pub fn resolve_statistics(&self, request: &ScoreRequest) -> StatisticsTable {
        let resolver = RangeResolver::new(&self.catalog, &request.global_ranges);
        let axis_keys = request
            .x_axis
            .metrics()
            .iter()
            .chain(request.y_axis.metrics())
            .map(|metric| metric.metric_key.as_str());
        let mut table = StatisticsTable::new();
        for key in axis_keys.chain(request.z_metric.as_deref()) {
            if table.contains_key(key) {
                continue;
            }
            let stats = resolver.resolve(&request.companies, key, request.normalization);
            table.insert(key.to_owned(), stats);
        }
        table
    }

    /// Score every company in `request`, in input order.
    #[must_use]
    pub fn run(&self, request: &ScoreRequest) -> Vec<PlotPoint> {
        let table = self.resolve_statistics(request);
        debug!(
            "scoring {} companies over {} metrics ({} normalisation, {} imputation)",
            request.companies.len(),
            table.len(),
            request.normalization,
            request.imputation
        );
        let z_path = request
            .z_metric
            .as_deref()
            .map(|key| self.catalog.field_path(key));
        request
            .companies
            .iter()
            .map(|company| PlotPoint {
                company_id: company.id,
                x_score: self.score_company(company, &request.x_axis, &table, request),
                y_score: self.score_company(company, &request.y_axis, &table, request),
                z_value: z_path.and_then(|path| extract(company, path)),
            })
            .collect()
    }

    fn score_company(
        &self,
        company: &CompanyRecord,
        axis: &AxisConfig,
        table: &StatisticsTable,
        request: &ScoreRequest,
    ) -> Option<f64> {
        score_axis(axis, |metric| {
            self.normalized_value(company, metric, table, request)
        })
    }

    fn normalized_value(
        &self,
        company: &CompanyRecord,
        metric: &AxisMetricConfig,
        table: &StatisticsTable,
        request: &ScoreRequest,
    ) -> f64 {
        let stats = table.get(&metric.metric_key).unwrap_or(&DEGENERATE);
        let raw = extract(company, self.catalog.field_path(&metric.metric_key));
        let value = impute(raw, stats, request.imputation, metric.higher_is_better);
        normalize(value, stats, request.normalization, metric.higher_is_better)
    }
}

impl PlotScorer for ScoreEngine {
    fn score(&self, request: &ScoreRequest) -> Vec<PlotPoint> {
        self.run(request)
    }
}
