//! Scenario fixtures and regression harness for evidence-scoring catalogs.
//!
//! Each fixture is a TOML file naming a built-in tool, a document and the
//! scores the scan must produce. The harness runs every fixture in a
//! directory and separates regressions from failures already listed in
//! `expected-failures.toml`.
//!
//! ## Modules
//!
//! - [`fixture`] - the fixture format
//! - [`loader`] - fixture discovery
//! - [`runner`] - scanning fixtures and comparing results
//! - [`failures`] - expected failures tracking via TOML
//! - [`formatter`] - failure and summary output
//! - [`telemetry`] - subscriber setup for harness runs

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;
pub mod telemetry;

pub use config::HarnessConfig;
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{CategoryExpectation, Expectations, ScenarioFixture};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{run_fixture, run_harness, Check, FixtureReport, HarnessRun, SCORE_TOLERANCE};

/// Run the harness described by `config`.
pub fn run(config: &HarnessConfig) -> SpecResult<HarnessRun> {
    let expected = ExpectedFailures::load(&config.expected_failures)?;
    run_harness(&config.fixtures_dir, &expected, &config.catalogs)
}
