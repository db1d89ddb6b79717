//! Named presets bundling axis selections with mode defaults.
//!
//! The enum offers compile-time safety for template lookups.
//!
//! # Examples
//! ```
//! use scatterscore_core::ScoringTemplate;
//!
//! let template: ScoringTemplate = "value-hunter".parse().unwrap();
//! let definition = template.definition();
//! assert_eq!(definition.x_axis.total_weight(), 100);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{AxisConfig, AxisMetricConfig, ImputationMode, NormalizationMode, ScoreRequest, ZScale};

/// Built-in scoring presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScoringTemplate {
    /// Cheap ounces against balance-sheet strength.
    ValueHunter,
    /// Resource and production growth against development cost.
    GrowthPotential,
    /// Output scale against cost position for producers.
    ProducerProfile,
    /// Liquidity and cash generation against leverage.
    FinancialStrength,
}

/// Axis selections and defaults supplied by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateDefinition {
    /// Template this definition belongs to.
    pub template: ScoringTemplate,
    /// X axis selections.
    pub x_axis: AxisConfig,
    /// Y axis selections.
    pub y_axis: AxisConfig,
    /// Metric used for bubble size.
    pub z_metric: String,
    /// Bubble scale.
    pub z_scale: ZScale,
    /// Default normalisation.
    pub normalization: NormalizationMode,
    /// Default imputation.
    pub imputation: ImputationMode,
}

fn axis(metrics: &[(&str, u8, bool)]) -> AxisConfig {
    metrics
        .iter()
        .map(|&(key, weight, higher)| AxisMetricConfig::new(key, weight, higher))
        .collect()
}

impl ScoringTemplate {
    /// Every template, in display order.
    pub const ALL: [Self; 4] = [
        Self::ValueHunter,
        Self::GrowthPotential,
        Self::ProducerProfile,
        Self::FinancialStrength,
    ];

    /// Return the template as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValueHunter => "value-hunter",
            Self::GrowthPotential => "growth-potential",
            Self::ProducerProfile => "producer-profile",
            Self::FinancialStrength => "financial-strength",
        }
    }

    /// Build the template's axis selections and defaults.
    #[must_use]
    pub fn definition(self) -> TemplateDefinition {
        let (x_axis, y_axis, z_metric, z_scale, normalization, imputation) = match self {
            Self::ValueHunter => (
                axis(&[
                    ("ev_per_reserve_oz", 40, false),
                    ("mkt_cap_per_resource_oz", 40, false),
                    ("ev_per_production_oz", 20, false),
                ]),
                axis(&[("cash", 50, true), ("debt", 30, false), ("free_cash_flow", 20, true)]),
                "market_cap",
                ZScale::Log,
                NormalizationMode::DatasetRankPercentile,
                ImputationMode::DatasetMedian,
            ),
            Self::GrowthPotential => (
                axis(&[
                    ("resources_total_aueq_moz", 50, true),
                    ("mi_total_aueq_moz", 30, true),
                    ("future_production_aueq_koz", 20, true),
                ]),
                axis(&[("mkt_cap_per_resource_oz", 60, false), ("cash", 40, true)]),
                "enterprise_value",
                ZScale::Log,
                NormalizationMode::DatasetMinMax,
                ImputationMode::ZeroOrWorst,
            ),
            Self::ProducerProfile => (
                axis(&[
                    ("current_production_aueq_koz", 60, true),
                    ("reserves_total_aueq_moz", 25, true),
                    ("mine_life_years", 15, true),
                ]),
                axis(&[("aisc_last_year", 70, false), ("aic_last_year", 30, false)]),
                "revenue",
                ZScale::Linear,
                NormalizationMode::DatasetZScore,
                ImputationMode::DatasetMean,
            ),
            Self::FinancialStrength => (
                axis(&[("cash", 40, true), ("free_cash_flow", 35, true), ("ebitda", 25, true)]),
                axis(&[("debt", 70, false), ("shares_outstanding", 30, false)]),
                "market_cap",
                ZScale::Log,
                NormalizationMode::GlobalMinMax,
                ImputationMode::ZeroOrWorst,
            ),
        };
        TemplateDefinition {
            template: self,
            x_axis,
            y_axis,
            z_metric: z_metric.to_owned(),
            z_scale,
            normalization,
            imputation,
        }
    }
}

impl fmt::Display for ScoringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown template '{s}'"))
    }
}

impl ScoreRequest {
    /// Replace the axes, Z metric and modes with a template's defaults.
    pub fn apply_template(&mut self, template: ScoringTemplate) {
        let definition = template.definition();
        self.x_axis = definition.x_axis;
        self.y_axis = definition.y_axis;
        self.z_metric = Some(definition.z_metric);
        self.z_scale = definition.z_scale;
        self.normalization = definition.normalization;
        self.imputation = definition.imputation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricCatalog;
    use rstest::rstest;

    #[rstest]
    fn every_template_is_a_valid_request() {
        for template in ScoringTemplate::ALL {
            let mut request = ScoreRequest::default();
            request.apply_template(template);
            assert_eq!(request.validate_detailed(), Ok(()), "{template}");
        }
    }

    #[rstest]
    fn template_metrics_exist_in_the_catalogue() {
        let catalog = MetricCatalog::mining();
        for template in ScoringTemplate::ALL {
            let definition = template.definition();
            let keys = definition
                .x_axis
                .metrics()
                .iter()
                .chain(definition.y_axis.metrics())
                .map(|m| m.metric_key.as_str())
                .chain(std::iter::once(definition.z_metric.as_str()));
            for key in keys {
                assert!(catalog.get(key).is_some(), "{template} uses unknown {key}");
            }
        }
    }

    #[rstest]
    fn template_directions_match_catalogue_defaults() {
        let catalog = MetricCatalog::mining();
        for template in ScoringTemplate::ALL {
            let definition = template.definition();
            for metric in definition.x_axis.metrics().iter().chain(definition.y_axis.metrics()) {
                let default = catalog
                    .get(&metric.metric_key)
                    .map(|def| def.default_higher_is_better);
                assert_eq!(default, Some(metric.higher_is_better), "{}", metric.metric_key);
            }
        }
    }

    #[rstest]
    fn names_round_trip() {
        for template in ScoringTemplate::ALL {
            assert_eq!(template.to_string().parse::<ScoringTemplate>(), Ok(template));
        }
        assert!("momentum".parse::<ScoringTemplate>().is_err());
    }
}
