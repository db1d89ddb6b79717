//! Turn a run snapshot into chart points.
//!
//! The `PlotScorer` trait is the seam between whatever holds configuration
//! state (a UI, the CLI) and the engine that computes scores.

use crate::{PlotPoint, ScoreRequest};

/// Compute one [`PlotPoint`] per company for a request.
///
/// Implementations must be pure: the same request always yields the same
/// points, and nothing is cached between calls. The method is infallible;
/// missing data is imputed rather than reported. Callers validate the request
/// with [`ScoreRequest::validate_detailed`] beforehand.
///
/// Implementations must:
/// - Return points in the order of `request.companies`.
/// - Produce finite scores in `0.0..=1.0`, or `None` for an empty axis.
///
/// Use [`PlotScorer::sanitise`] to apply the range guard.
///
/// # Examples
///
/// ```rust
/// use scatterscore_core::{PlotPoint, PlotScorer, ScoreRequest};
///
/// struct CentreScorer;
///
/// impl PlotScorer for CentreScorer {
///     fn score(&self, request: &ScoreRequest) -> Vec<PlotPoint> {
///         request
///             .companies
///             .iter()
///             .map(|c| PlotPoint { company_id: c.id, x_score: Some(0.5), y_score: Some(0.5), z_value: None })
///             .collect()
///     }
/// }
///
/// assert!(CentreScorer.score(&ScoreRequest::default()).is_empty());
/// ```
pub trait PlotScorer: Send + Sync {
    /// Score every company in `request`.
    fn score(&self, request: &ScoreRequest) -> Vec<PlotPoint>;

    /// Clamp and validate a composite score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}
