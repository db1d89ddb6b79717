//! Keep the weights on one axis summing to exactly 100.
//!
//! The rebalancer is total: it never fails and, for any non-empty input,
//! always returns integer weights in `0..=100` whose sum is 100.

use log::trace;

use crate::AxisMetricConfig;

/// Total every non-empty axis must reach.
pub const WEIGHT_TOTAL: u8 = 100;

/// Weight given to a metric when it is first added to an axis.
pub const DEFAULT_NEW_METRIC_WEIGHT: u8 = 5;

/// A user edit that triggers a rebalance.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightEdit {
    /// The metric with this key was just appended to the axis.
    Added {
        /// Key of the new metric.
        metric_key: String,
    },
    /// The user typed a new weight for an existing metric.
    Reweighted {
        /// Key of the edited metric.
        metric_key: String,
        /// Requested weight; clamped into `0..=100`, NaN counts as zero.
        weight: f64,
    },
}

impl WeightEdit {
    fn metric_key(&self) -> &str {
        match self {
            Self::Added { metric_key } | Self::Reweighted { metric_key, .. } => metric_key,
        }
    }

    fn pinned_weight(&self) -> u32 {
        match self {
            Self::Added { .. } => u32::from(DEFAULT_NEW_METRIC_WEIGHT),
            Self::Reweighted { weight, .. } => clamp_weight(*weight),
        }
    }
}

/// Rebalance `metrics` so their weights sum to 100.
///
/// Without an edit every metric is rescaled proportionally. With an edit the
/// edited metric is pinned (at the default seed for additions, or at the
/// requested weight) and the others share the remainder in proportion to
/// their current weights, or equally when those are all zero.
///
/// # Examples
/// ```
/// use scatterscore_core::{AxisMetricConfig, WeightEdit, rebalance};
///
/// let metrics = vec![
///     AxisMetricConfig::new("a", 70, true),
///     AxisMetricConfig::new("b", 30, true),
/// ];
/// let edit = WeightEdit::Reweighted { metric_key: "a".into(), weight: 50.0 };
/// let weights: Vec<u8> = rebalance(&metrics, Some(&edit))
///     .iter()
///     .map(|m| m.weight)
///     .collect();
/// assert_eq!(weights, vec![50, 50]);
/// ```
#[must_use]
pub fn rebalance(metrics: &[AxisMetricConfig], edit: Option<&WeightEdit>) -> Vec<AxisMetricConfig> {
    let mut rebalanced = metrics.to_vec();
    if rebalanced.len() <= 1 {
        for only in &mut rebalanced {
            only.weight = WEIGHT_TOTAL;
        }
        return rebalanced;
    }

    let pinned = edit.and_then(|e| {
        rebalanced
            .iter()
            .position(|m| m.metric_key == e.metric_key())
            .map(|index| (index, e.pinned_weight()))
    });
    let budget = u32::from(WEIGHT_TOTAL) - pinned.map_or(0, |(_, weight)| weight);
    let pinned_index = pinned.map(|(index, _)| index);

    let current: Vec<u32> = rebalanced.iter().map(|m| u32::from(m.weight)).collect();
    let mut weights = share_budget(&current, pinned_index, budget);
    if let Some((index, weight)) = pinned
        && let Some(slot) = weights.get_mut(index)
    {
        *slot = weight;
    }
    correct_rounding(&mut weights, pinned_index);

    for (metric, weight) in rebalanced.iter_mut().zip(weights) {
        metric.weight = u8::try_from(weight).unwrap_or(WEIGHT_TOTAL);
    }
    trace!(
        "rebalanced {} metrics around {:?}",
        rebalanced.len(),
        edit.map(WeightEdit::metric_key)
    );
    rebalanced
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "weights are clamped to 0..=100 before the cast"
)]
fn clamp_weight(weight: f64) -> u32 {
    if weight.is_nan() {
        return 0;
    }
    weight.clamp(0.0, f64::from(WEIGHT_TOTAL)).round() as u32
}

/// Split `budget` across every metric except `pinned`, rounded to integers.
#[expect(
    clippy::float_arithmetic,
    reason = "proportional shares require floating-point division"
)]
fn share_budget(current: &[u32], pinned: Option<usize>, budget: u32) -> Vec<u32> {
    let adjustable = |index: usize| Some(index) != pinned;
    let prior_sum: u32 = current
        .iter()
        .enumerate()
        .filter(|&(index, _)| adjustable(index))
        .map(|(_, weight)| *weight)
        .sum();
    let adjustable_count = current
        .iter()
        .enumerate()
        .filter(|&(index, _)| adjustable(index))
        .count();
    let budget_f64 = f64::from(budget);

    current
        .iter()
        .enumerate()
        .map(|(index, &weight)| {
            if !adjustable(index) {
                return 0;
            }
            let share = if prior_sum > 0 {
                f64::from(weight) * budget_f64 / f64::from(prior_sum)
            } else {
                budget_f64 / f64::from(u32::try_from(adjustable_count).unwrap_or(u32::MAX))
            };
            clamp_weight(share)
        })
        .collect()
}

/// Absorb the rounding error so the weights sum to exactly 100.
///
/// The error goes to one metric: the heaviest unpinned metric that can take
/// it without leaving `0..=100`, otherwise the heaviest metric overall. Any
/// residue left by clamping is then spread one unit at a time.
fn correct_rounding(weights: &mut [u32], pinned: Option<usize>) {
    let total = i64::from(WEIGHT_TOTAL);
    let diff = total - weights.iter().map(|w| i64::from(*w)).sum::<i64>();
    if diff == 0 {
        return;
    }

    let fits = |weight: u32| (0..=total).contains(&(i64::from(weight) + diff));
    let target = heaviest(weights, |index, weight| Some(index) != pinned && fits(weight))
        .or_else(|| heaviest(weights, |_, _| true));
    if let Some(slot) = target.and_then(|index| weights.get_mut(index)) {
        let adjusted = (i64::from(*slot) + diff).clamp(0, total);
        *slot = u32::try_from(adjusted).unwrap_or(0);
    }
    settle_residue(weights, pinned);
}

fn heaviest(weights: &[u32], eligible: impl Fn(usize, u32) -> bool) -> Option<usize> {
    weights
        .iter()
        .enumerate()
        .filter(|&(index, &weight)| eligible(index, weight))
        // Earliest index wins ties.
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(index, _)| index)
}

fn settle_residue(weights: &mut [u32], pinned: Option<usize>) {
    let total = u32::from(WEIGHT_TOTAL);
    let mut order: Vec<usize> = (0..weights.len()).collect();
    // Unpinned metrics absorb residue before the pinned one.
    order.sort_by_key(|&index| Some(index) == pinned);
    loop {
        let sum: u32 = weights.iter().sum();
        if sum == total {
            return;
        }
        let step = order.iter().copied().find(|&index| {
            weights
                .get(index)
                .is_some_and(|&w| if sum < total { w < total } else { w > 0 })
        });
        let Some(slot) = step.and_then(|index| weights.get_mut(index)) else {
            return;
        };
        if sum < total {
            *slot += 1;
        } else {
            *slot -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn axis(weights: &[(&str, u8)]) -> Vec<AxisMetricConfig> {
        weights
            .iter()
            .map(|&(key, weight)| AxisMetricConfig::new(key, weight, true))
            .collect()
    }

    fn weights(metrics: &[AxisMetricConfig]) -> Vec<u8> {
        metrics.iter().map(|m| m.weight).collect()
    }

    fn reweight(key: &str, weight: f64) -> WeightEdit {
        WeightEdit::Reweighted {
            metric_key: key.into(),
            weight,
        }
    }

    #[rstest]
    fn empty_axis_stays_empty() {
        assert!(rebalance(&[], None).is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(37)]
    #[case(100)]
    fn single_metric_takes_everything(#[case] weight: u8) {
        let result = rebalance(&axis(&[("a", weight)]), Some(&reweight("a", 12.0)));
        assert_eq!(weights(&result), vec![100]);
    }

    #[rstest]
    fn reweight_gives_remainder_to_the_other_metric() {
        let result = rebalance(&axis(&[("a", 70), ("b", 30)]), Some(&reweight("a", 50.0)));
        assert_eq!(weights(&result), vec![50, 50]);
    }

    #[rstest]
    fn added_metric_is_seeded_and_others_rescaled() {
        let result = rebalance(
            &axis(&[("a", 50), ("b", 50), ("c", 0)]),
            Some(&WeightEdit::Added {
                metric_key: "c".into(),
            }),
        );
        // 47.5 rounds up for both; the earlier metric absorbs the excess.
        assert_eq!(weights(&result), vec![47, 48, 5]);
    }

    #[rstest]
    fn rounding_error_lands_on_an_unpinned_metric() {
        let result = rebalance(
            &axis(&[("a", 10), ("b", 45), ("c", 45)]),
            Some(&reweight("a", 33.0)),
        );
        let w = weights(&result);
        assert_eq!(w.first(), Some(&33));
        assert_eq!(w.iter().map(|&x| u32::from(x)).sum::<u32>(), 100);
    }

    #[rstest]
    fn zero_prior_weights_share_equally() {
        let result = rebalance(
            &axis(&[("a", 0), ("b", 0), ("c", 0), ("d", 0)]),
            Some(&reweight("a", 40.0)),
        );
        assert_eq!(weights(&result), vec![40, 20, 20, 20]);
    }

    #[rstest]
    #[case(f64::NAN, 0)]
    #[case(-25.0, 0)]
    #[case(250.0, 100)]
    fn invalid_edits_are_clamped(#[case] requested: f64, #[case] expected: u8) {
        let result = rebalance(&axis(&[("a", 50), ("b", 50)]), Some(&reweight("a", requested)));
        assert_eq!(result.first().map(|m| m.weight), Some(expected));
        assert_eq!(
            result.iter().map(|m| u32::from(m.weight)).sum::<u32>(),
            100
        );
    }

    #[rstest]
    fn no_edit_renormalises_proportionally() {
        let result = rebalance(&axis(&[("a", 30), ("b", 30)]), None);
        assert_eq!(weights(&result), vec![50, 50]);
    }

    #[rstest]
    fn unknown_edit_key_renormalises_everything() {
        let result = rebalance(&axis(&[("a", 1), ("b", 2), ("c", 1)]), Some(&reweight("z", 90.0)));
        assert_eq!(weights(&result), vec![25, 50, 25]);
    }

    #[rstest]
    fn thirds_round_to_exact_total() {
        let result = rebalance(&axis(&[("a", 1), ("b", 1), ("c", 1)]), None);
        assert_eq!(weights(&result), vec![34, 33, 33]);
    }
}
