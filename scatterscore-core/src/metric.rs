//! Static catalogue of the metrics a company can be scored on.
//!
//! A [`MetricDefinition`] ties a stable key to the dotted field path used to
//! read the value from a [`CompanyRecord`](crate::CompanyRecord), the unit the
//! value is expressed in, and whether larger values are preferable by default.

use std::collections::BTreeMap;
use std::fmt;

/// Unit a metric value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetricUnit {
    /// Monetary amount, already converted to the reporting currency.
    Currency,
    /// Monetary amount per gold-equivalent ounce.
    CurrencyPerOunce,
    /// Millions of gold-equivalent ounces.
    Moz,
    /// Thousands of gold-equivalent ounces.
    Koz,
    /// Plain count, e.g. shares outstanding.
    Count,
    /// Percentage points.
    Percent,
    /// Duration in years.
    Years,
    /// Dimensionless ratio.
    Ratio,
}

impl MetricUnit {
    /// Return the unit as a short label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::CurrencyPerOunce => "currency/oz",
            Self::Moz => "Moz",
            Self::Koz => "koz",
            Self::Count => "count",
            Self::Percent => "%",
            Self::Years => "years",
            Self::Ratio => "ratio",
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of a single scoreable metric.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricDefinition {
    /// Stable identifier referenced by axis configurations.
    pub key: String,
    /// Dotted path to the value within a company record.
    pub field_path: String,
    /// Direction used when the metric is first added to an axis.
    pub default_higher_is_better: bool,
    /// Unit of the raw value.
    pub unit: MetricUnit,
}

impl MetricDefinition {
    /// Construct a definition.
    ///
    /// # Examples
    /// ```
    /// use scatterscore_core::{MetricDefinition, MetricUnit};
    ///
    /// let def = MetricDefinition::new("cash", "financials.cash_value", true, MetricUnit::Currency);
    /// assert_eq!(def.field_path, "financials.cash_value");
    /// ```
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        field_path: impl Into<String>,
        default_higher_is_better: bool,
        unit: MetricUnit,
    ) -> Self {
        Self {
            key: key.into(),
            field_path: field_path.into(),
            default_higher_is_better,
            unit,
        }
    }
}

/// Read-only lookup table of metric definitions keyed by metric key.
///
/// # Examples
/// ```
/// use scatterscore_core::MetricCatalog;
///
/// let catalog = MetricCatalog::mining();
/// let aisc = catalog.get("aisc_last_year").unwrap();
/// assert!(!aisc.default_higher_is_better);
/// assert_eq!(catalog.field_path("not_in_catalog"), "not_in_catalog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricCatalog {
    definitions: BTreeMap<String, MetricDefinition>,
}

impl MetricCatalog {
    /// Build a catalogue from definitions; later duplicates replace earlier ones.
    #[must_use]
    pub fn new<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = MetricDefinition>,
    {
        Self {
            definitions: definitions
                .into_iter()
                .map(|def| (def.key.clone(), def))
                .collect(),
        }
    }

    /// The metrics bundled with the mining dashboard.
    #[must_use]
    pub fn mining() -> Self {
        use MetricUnit::{Count, Currency, CurrencyPerOunce, Koz, Moz, Years};
        let table: [(&str, &str, bool, MetricUnit); 19] = [
            ("market_cap", "financials.market_cap_value", true, Currency),
            ("enterprise_value", "financials.enterprise_value_value", true, Currency),
            ("cash", "financials.cash_value", true, Currency),
            ("debt", "financials.debt_value", false, Currency),
            ("revenue", "financials.revenue_value", true, Currency),
            ("ebitda", "financials.ebitda", true, Currency),
            ("free_cash_flow", "financials.free_cash_flow", true, Currency),
            ("shares_outstanding", "capital_structure.existing_shares", false, Count),
            ("reserves_total_aueq_moz", "mineral_estimates.reserves_total_aueq_moz", true, Moz),
            ("mi_total_aueq_moz", "mineral_estimates.measured_indicated_total_aueq_moz", true, Moz),
            ("resources_total_aueq_moz", "mineral_estimates.resources_total_aueq_moz", true, Moz),
            ("current_production_aueq_koz", "production.current_production_total_aueq_koz", true, Koz),
            ("future_production_aueq_koz", "production.future_production_total_aueq_koz", true, Koz),
            ("aisc_last_year", "costs.aisc_last_year", false, CurrencyPerOunce),
            ("aic_last_year", "costs.aic_last_year", false, CurrencyPerOunce),
            ("mine_life_years", "production.reserve_life_years", true, Years),
            ("ev_per_reserve_oz", "valuation_metrics.ev_per_reserve_oz_all", false, CurrencyPerOunce),
            ("mkt_cap_per_resource_oz", "valuation_metrics.mkt_cap_per_resource_oz_all", false, CurrencyPerOunce),
            ("ev_per_production_oz", "valuation_metrics.ev_per_production_oz", false, CurrencyPerOunce),
        ];
        Self::new(
            table
                .into_iter()
                .map(|(key, path, higher, unit)| MetricDefinition::new(key, path, higher, unit)),
        )
    }

    /// Return the definition for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricDefinition> {
        self.definitions.get(key)
    }

    /// Return the field path for `key`, falling back to the key itself.
    #[must_use]
    pub fn field_path<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map_or(key, |def| def.field_path.as_str())
    }

    /// Iterate over definitions in key order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.definitions.values()
    }

    /// Return the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Report whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
