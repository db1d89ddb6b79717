//! Shared test harness modules for the ScatterScore CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when temporary files cannot be prepared"
)]

use super::*;
use camino::Utf8PathBuf;

mod helpers;
mod score_steps;
