//! Map raw metric values into `0.0..=1.0`.
//!
//! Every mode produces a score where 1.0 is best for the metric's effective
//! direction. Lower-is-better metrics are flipped after scaling (`1 - score`)
//! so tie handling in the rank mode is identical in both directions. When the
//! statistics carry no discriminating information the score is the neutral
//! 0.5.
#![forbid(unsafe_code)]

use scatterscore_core::NormalizationMode;

use crate::MetricStatistics;

/// Score returned when a metric cannot discriminate between companies.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Standard scores beyond this magnitude clamp to 0 or 1.
pub const Z_SCORE_CLAMP: f64 = 3.0;

/// Normalise `value` for one metric.
///
/// The result is always finite and within `0.0..=1.0`.
///
/// # Examples
/// ```
/// use scatterscore_core::NormalizationMode;
/// use scatterscore_engine::{MetricStatistics, normalize};
///
/// let stats = MetricStatistics::from_values([10.0, 20.0, 30.0]);
/// let mode = NormalizationMode::DatasetMinMax;
/// assert_eq!(normalize(20.0, &stats, mode, true), 0.5);
/// assert_eq!(normalize(10.0, &stats, mode, false), 1.0);
/// ```
#[must_use]
pub fn normalize(
    value: f64,
    stats: &MetricStatistics,
    mode: NormalizationMode,
    higher_is_better: bool,
) -> f64 {
    let scaled = match mode {
        NormalizationMode::DatasetMinMax | NormalizationMode::GlobalMinMax => {
            min_max(value, stats.min, stats.max)
        }
        NormalizationMode::DatasetRankPercentile => rank_percentile(value, &stats.sorted_values),
        NormalizationMode::DatasetZScore => z_score(value, stats.mean, stats.stddev),
    };
    let directed = if higher_is_better {
        scaled
    } else {
        flip(scaled)
    };
    clamp_unit(directed)
}

#[expect(
    clippy::float_arithmetic,
    reason = "inverting a unit score is a subtraction"
)]
const fn flip(score: f64) -> f64 {
    1.0 - score
}

const fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        NEUTRAL_SCORE
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear scaling divides by the range width"
)]
const fn min_max(value: f64, min: f64, max: f64) -> f64 {
    let width = max - min;
    if width == 0.0 || !width.is_finite() {
        return NEUTRAL_SCORE;
    }
    (value - min) / width
}

/// Tie-averaged rank of `value` divided by `count - 1`.
///
/// A value missing from the set (an imputed mean, say) ranks half a step
/// below the first larger value.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "ranks are averaged and divided as floating-point values"
)]
fn rank_percentile(value: f64, sorted: &[f64]) -> f64 {
    if sorted.len() < 2 {
        return NEUTRAL_SCORE;
    }
    let below = sorted.partition_point(|v| *v < value);
    let through = sorted.partition_point(|v| *v <= value);
    let below_f64 = below as f64;
    let rank = if through > below {
        let tied_last = (through - 1) as f64;
        (below_f64 + tied_last) / 2.0
    } else {
        (below_f64 - 0.5).max(0.0)
    };
    rank / (sorted.len() - 1) as f64
}

#[expect(
    clippy::float_arithmetic,
    reason = "standard scores are linear transforms of the value"
)]
const fn z_score(value: f64, mean: f64, stddev: f64) -> f64 {
    let z = if stddev == 0.0 || !stddev.is_finite() {
        0.0
    } else {
        (value - mean) / stddev
    };
    (z.clamp(-Z_SCORE_CLAMP, Z_SCORE_CLAMP) + Z_SCORE_CLAMP) / (2.0 * Z_SCORE_CLAMP)
}
