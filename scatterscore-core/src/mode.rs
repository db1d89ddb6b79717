//! Strategy selections for a scoring run.
//!
//! Each enum round-trips through a kebab-case name so the same spelling works
//! in JSON payloads, configuration files and command-line flags.
//!
//! # Examples
//! ```
//! use scatterscore_core::NormalizationMode;
//!
//! let mode: NormalizationMode = "dataset-z-score".parse().unwrap();
//! assert_eq!(mode, NormalizationMode::DatasetZScore);
//! assert_eq!(mode.to_string(), "dataset-z-score");
//! ```

use std::fmt;
use std::str::FromStr;

/// How raw metric values are mapped into `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NormalizationMode {
    /// Linear scale between the minimum and maximum of the company set.
    #[default]
    DatasetMinMax,
    /// Linear scale between a precomputed all-companies range.
    GlobalMinMax,
    /// Tie-averaged rank within the company set.
    DatasetRankPercentile,
    /// Standard score within the company set, clamped to three deviations.
    DatasetZScore,
}

impl NormalizationMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [
        Self::DatasetMinMax,
        Self::GlobalMinMax,
        Self::DatasetRankPercentile,
        Self::DatasetZScore,
    ];

    /// Return the mode as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatasetMinMax => "dataset-min-max",
            Self::GlobalMinMax => "global-min-max",
            Self::DatasetRankPercentile => "dataset-rank-percentile",
            Self::DatasetZScore => "dataset-z-score",
        }
    }

    /// Report whether the mode reads the caller-supplied global range table.
    #[must_use]
    pub const fn uses_global_ranges(self) -> bool {
        matches!(self, Self::GlobalMinMax)
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown normalization mode '{s}'"))
    }
}

/// How a missing raw value is substituted before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ImputationMode {
    /// The raw bound that normalizes to the worst score, or zero without data.
    #[default]
    ZeroOrWorst,
    /// The mean of the present values.
    DatasetMean,
    /// The median of the present values.
    DatasetMedian,
}

impl ImputationMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 3] = [Self::ZeroOrWorst, Self::DatasetMean, Self::DatasetMedian];

    /// Return the mode as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroOrWorst => "zero-or-worst",
            Self::DatasetMean => "dataset-mean",
            Self::DatasetMedian => "dataset-median",
        }
    }
}

impl fmt::Display for ImputationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImputationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown imputation mode '{s}'"))
    }
}

/// Scale the chart layer applies to the raw Z value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ZScale {
    /// Linear bubble sizing.
    #[default]
    Linear,
    /// Logarithmic bubble sizing.
    Log,
}

impl ZScale {
    /// Return the scale as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for ZScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            _ => Err(format!("unknown z scale '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dataset-min-max", NormalizationMode::DatasetMinMax)]
    #[case("GLOBAL-MIN-MAX", NormalizationMode::GlobalMinMax)]
    #[case("dataset-rank-percentile", NormalizationMode::DatasetRankPercentile)]
    #[case("dataset-z-score", NormalizationMode::DatasetZScore)]
    fn parses_normalization_modes(#[case] input: &str, #[case] expected: NormalizationMode) {
        assert_eq!(input.parse::<NormalizationMode>(), Ok(expected));
    }

    #[rstest]
    fn display_matches_as_str() {
        for mode in ImputationMode::ALL {
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = ImputationMode::from_str("dataset-mode").unwrap_err();
        assert!(err.contains("unknown imputation mode"));
    }

    #[rstest]
    fn only_global_min_max_reads_global_ranges() {
        let global: Vec<_> = NormalizationMode::ALL
            .into_iter()
            .filter(|mode| mode.uses_global_ranges())
            .collect();
        assert_eq!(global, vec![NormalizationMode::GlobalMinMax]);
    }

    #[rstest]
    #[case("log", ZScale::Log)]
    #[case("Linear", ZScale::Linear)]
    fn parses_z_scale(#[case] input: &str, #[case] expected: ZScale) {
        assert_eq!(input.parse::<ZScale>(), Ok(expected));
    }
}
