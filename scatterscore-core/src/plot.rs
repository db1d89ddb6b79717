//! Chart-ready output of a scoring run.

use crate::CompanyId;

/// One company's position on the scatter chart.
///
/// Scores are composites in `0.0..=1.0`; `None` means the axis was not
/// configured. The Z value is the raw metric, scaled by the chart layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotPoint {
    /// Company the point represents.
    pub company_id: CompanyId,
    /// Composite X axis score.
    pub x_score: Option<f64>,
    /// Composite Y axis score.
    pub y_score: Option<f64>,
    /// Raw Z metric value.
    pub z_value: Option<f64>,
}

impl PlotPoint {
    /// Report whether both axis scores can be drawn.
    ///
    /// # Examples
    /// ```
    /// use scatterscore_core::PlotPoint;
    ///
    /// let point = PlotPoint { company_id: 1, x_score: Some(0.4), y_score: None, z_value: None };
    /// assert!(!point.is_plottable());
    /// ```
    #[must_use]
    pub fn is_plottable(&self) -> bool {
        is_valid_number(self.x_score) && is_valid_number(self.y_score)
    }
}

/// Report whether an optional value is present and finite.
#[must_use]
pub fn is_valid_number(value: Option<f64>) -> bool {
    value.is_some_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0.0), true)]
    #[case(Some(1.0), true)]
    #[case(None, false)]
    #[case(Some(f64::NAN), false)]
    #[case(Some(f64::INFINITY), false)]
    fn valid_numbers(#[case] value: Option<f64>, #[case] expected: bool) {
        assert_eq!(is_valid_number(value), expected);
    }

    #[rstest]
    fn points_need_both_scores() {
        let point = PlotPoint {
            company_id: 3,
            x_score: Some(0.2),
            y_score: Some(0.9),
            z_value: None,
        };
        assert!(point.is_plottable());
        let missing_x = PlotPoint {
            x_score: None,
            ..point
        };
        assert!(!missing_x.is_plottable());
    }
}
