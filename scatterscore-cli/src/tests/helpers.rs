//! Test helpers for staging CLI inputs on disk.

use camino::{Utf8Path, Utf8PathBuf};
use scatterscore_core::{AxisConfig, AxisMetricConfig, CompanyRecord, ScoreRequest};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    scatterscore_fs::write_utf8_file(path, contents).expect("write test input");
}

pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Three producers with AISC 900, 1100 and 1300 and market caps 1, 2 and 3 billion.
pub(super) fn sample_request() -> ScoreRequest {
    let companies = [(900.0, 1.0e9), (1100.0, 2.0e9), (1300.0, 3.0e9)]
        .into_iter()
        .zip(1..)
        .map(|((aisc, market_cap), id)| {
            CompanyRecord::new(id)
                .with_name(format!("Miner {id}"))
                .with_value("costs.aisc_last_year", aisc)
                .with_value("financials.market_cap_value", market_cap)
        })
        .collect();
    ScoreRequest {
        companies,
        x_axis: AxisConfig::from_metrics(vec![AxisMetricConfig::new("market_cap", 100, true)]),
        y_axis: AxisConfig::from_metrics(vec![AxisMetricConfig::new(
            "aisc_last_year",
            100,
            false,
        )]),
        z_metric: Some("market_cap".into()),
        ..ScoreRequest::default()
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &ScoreRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
