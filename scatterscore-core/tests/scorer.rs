//! Contract tests for the `PlotScorer` trait.

use rstest::rstest;
use scatterscore_core::{CompanyRecord, PlotPoint, PlotScorer, ScoreRequest};

const TOLERANCE: f64 = 1e-12;

/// Scores each company by a raw value, passed through the range guard.
pub struct RawValueScorer;

impl PlotScorer for RawValueScorer {
    fn score(&self, request: &ScoreRequest) -> Vec<PlotPoint> {
        request
            .companies
            .iter()
            .map(|company| {
                #[expect(
                    clippy::cast_precision_loss,
                    clippy::float_arithmetic,
                    reason = "test ids are small"
                )]
                let raw = company.id as f64 / 10.0;
                PlotPoint {
                    company_id: company.id,
                    x_score: Some(Self::sanitise(raw)),
                    y_score: None,
                    z_value: Some(raw),
                }
            })
            .collect()
    }
}

#[rstest]
#[case(f64::NAN, 0.0)]
#[case(f64::INFINITY, 0.0)]
#[case(f64::NEG_INFINITY, 0.0)]
#[case(-0.1, 0.0)]
#[case(1.2, 1.0)]
#[case(0.4, 0.4)]
#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn sanitise_clamps_and_filters(#[case] input: f64, #[case] expected: f64) {
    let result = RawValueScorer::sanitise(input);
    assert!(result.is_finite(), "result must be finite");
    assert!((0.0..=1.0).contains(&result), "result must be within [0, 1]");
    assert!((result - expected).abs() <= TOLERANCE);
}

#[rstest]
fn scorers_keep_company_order_and_raw_z_values() {
    let request = ScoreRequest {
        companies: [3, 15, 7].into_iter().map(CompanyRecord::new).collect(),
        ..ScoreRequest::default()
    };

    let points = RawValueScorer.score(&request);

    let ids: Vec<_> = points.iter().map(|p| p.company_id).collect();
    assert_eq!(ids, [3, 15, 7]);
    let xs: Vec<_> = points.iter().map(|p| p.x_score).collect();
    assert_eq!(xs, [Some(0.3), Some(1.0), Some(0.7)]);
    assert_eq!(points.get(1).and_then(|p| p.z_value), Some(1.5));
    assert!(points.iter().all(|p| !p.is_plottable()));
}

#[rstest]
fn scorers_are_object_safe() {
    let scorer: Box<dyn PlotScorer> = Box::new(RawValueScorer);
    assert!(scorer.score(&ScoreRequest::default()).is_empty());
}
