//! Behaviour-driven step definitions driving the score CLI scenarios.

use super::helpers::{sample_request, temp_root, write_request, write_utf8};
use super::*;
use crate::score::{ScoreConfig, ScoreReport, ScoreScorerBuilder, run_score_with};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use scatterscore_core::test_support::FixedPlotScorer;
use scatterscore_core::{
    AxisConfigError, AxisLabel, AxisMetricConfig, PlotPoint, PlotScorer,
    ScoreRequestValidationError, ScoringTemplate,
};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct ScoreWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ScoreWorld {
    fn new() -> Self {
        let (tmp, root) = temp_root();
        let request_path = root.join("request.json");
        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["scatterscore".to_owned(), "score".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> String {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        format!("{error:?}")
    }

    fn report(&self) -> ScoreReport {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be a score report")
    }
}

#[fixture]
fn world() -> ScoreWorld {
    ScoreWorld::new()
}

/// Builds a scorer that places every company at the centre of the chart.
struct CentreScorerBuilder;

impl ScoreScorerBuilder for CentreScorerBuilder {
    fn build(&self, _config: &ScoreConfig) -> Result<Box<dyn PlotScorer>, CliError> {
        Ok(Box::new(FixedPlotScorer::default()))
    }
}

#[given("a valid score request exists on disk")]
fn valid_score_request_exists(#[from(world)] world: &ScoreWorld) {
    write_request(&world.request_path, &sample_request());
}

#[given("I choose the financial-strength template")]
fn choose_template(#[from(world)] world: &ScoreWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_SCORE_TEMPLATE}"),
        ScoringTemplate::FinancialStrength.to_string(),
    ]);
}

#[given("the score request contains invalid JSON")]
fn score_request_contains_invalid_json(#[from(world)] world: &ScoreWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the score request has axis weights summing to 90")]
fn score_request_unbalanced(#[from(world)] world: &ScoreWorld) {
    let mut request = sample_request();
    request.x_axis = [
        AxisMetricConfig::new("market_cap", 60, true),
        AxisMetricConfig::new("cash", 30, true),
    ]
    .into_iter()
    .collect();
    write_request(&world.request_path, &request);
}

#[given("I omit the score request path")]
fn omit_score_request_path(#[from(world)] world: &ScoreWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the score command")]
fn run_score_command(#[from(world)] world: &ScoreWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Score(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_score_with(args, &CentreScorerBuilder, &mut *buffer)
        }
        other => panic!("expected score command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints one point per company")]
fn command_succeeds_and_prints_points(#[from(world)] world: &ScoreWorld) {
    let report = world.report();
    let ids: Vec<_> = report.points.iter().map(|p| p.company_id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert!(report.points.iter().all(PlotPoint::is_plottable));
}

#[then("the report uses the financial-strength axes")]
fn report_uses_template(#[from(world)] world: &ScoreWorld) {
    let report = world.report();
    let definition = ScoringTemplate::FinancialStrength.definition();
    assert_eq!(report.x_axis, definition.x_axis);
    assert_eq!(report.y_axis, definition.y_axis);
    assert_eq!(report.z_metric.as_deref(), Some(definition.z_metric.as_str()));
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &ScoreWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::ParseInput { field, .. }) => assert_eq!(*field, ARG_SCORE_REQUEST),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[then("the command fails because the x axis is invalid")]
fn command_fails_invalid_axis(#[from(world)] world: &ScoreWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::InvalidScoreRequest { source, .. }) => assert_eq!(
            *source,
            ScoreRequestValidationError::Axis {
                axis: AxisLabel::X,
                source: AxisConfigError::WeightSum { total: 90 },
            }
        ),
        other => panic!("expected InvalidScoreRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &ScoreWorld) {
    let message = world.error();
    assert!(
        message.contains("MissingArgument"),
        "expected MissingArgument, found {message}"
    );
}

macro_rules! register_score_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/score_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ScoreWorld) {
            let _ = world;
        }
    };
}

register_score_scenario!(score_happy_path, "scoring a request from JSON");
register_score_scenario!(score_with_template, "applying a template from the command line");
register_score_scenario!(score_invalid_json, "rejecting invalid JSON input");
register_score_scenario!(score_unbalanced_axes, "rejecting requests with unbalanced axes");
register_score_scenario!(score_missing_request, "rejecting missing request paths");
