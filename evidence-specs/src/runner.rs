//! Fixture execution.
//!
//! [`run_fixture`] scans one fixture's document with the catalog it names
//! and compares the result with each expectation, producing one [`Check`]
//! per expectation. [`run_harness`] does the same for a directory and
//! tallies the checks against the expected failures list.

use std::fmt::Display;
use std::path::Path;

use evidence_catalogs::{load_catalog, CatalogSource, Tool};
use evidence_scoring::{Axis, Evidence, EvidenceDisplay, ScanEngine};

use crate::failures::{ExpectedFailures, HarnessResult};
use crate::fixture::{CategoryExpectation, ScenarioFixture};
use crate::formatter::format_failure;
use crate::loader::load_all_fixtures;
use crate::{SpecError, SpecResult};

/// Largest difference at which two scores still compare equal.
pub const SCORE_TOLERANCE: f64 = 0.05;

/// One compared expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// `overall_score`, `categories.<name>.score`, ...
    pub reference: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub fixture: String,
    pub tool: Tool,
    pub checks: Vec<Check>,
    /// Evidence drawn under the document text, for single-line documents.
    pub rendered: Option<String>,
}

impl FixtureReport {
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|check| !check.passed)
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }
}

#[derive(Default)]
struct Checks(Vec<Check>);

impl Checks {
    fn push(&mut self, reference: String, expected: String, actual: String, passed: bool) {
        self.0.push(Check {
            reference,
            expected,
            actual,
            passed,
        });
    }

    fn score(&mut self, reference: impl Into<String>, expected: Option<f64>, actual: f64) {
        if let Some(expected) = expected {
            let passed = (expected - actual).abs() <= SCORE_TOLERANCE;
            self.push(reference.into(), format!("{:.1}", expected), format!("{:.1}", actual), passed);
        }
    }

    fn exact<T>(&mut self, reference: impl Into<String>, expected: Option<T>, actual: T)
    where
        T: PartialEq + Display,
    {
        if let Some(expected) = expected {
            let passed = expected == actual;
            self.push(reference.into(), expected.to_string(), actual.to_string(), passed);
        }
    }

    fn list(&mut self, reference: impl Into<String>, expected: Option<&Vec<String>>, actual: &[String]) {
        if let Some(expected) = expected {
            let passed = expected.as_slice() == actual;
            self.push(
                reference.into(),
                format!("{:?}", expected),
                format!("{:?}", actual),
                passed,
            );
        }
    }

    /// Matched texts and page of one category's evidence.
    fn evidence(&mut self, expected: &CategoryExpectation, evidence: &[Evidence]) {
        let items: Vec<&Evidence> = evidence.iter().filter(|e| e.category == expected.name).collect();
        for text in &expected.evidence {
            let found = items.iter().any(|item| &item.matched_text == text);
            self.push(
                ExpectedFailures::format_ref(&expected.name, "evidence"),
                format!("{:?}", text),
                if found { format!("{:?}", text) } else { "no such match".into() },
                found,
            );
        }
        if let Some(page) = expected.page {
            let actual = items.first().and_then(|item| item.page_number);
            self.push(
                ExpectedFailures::format_ref(&expected.name, "page"),
                page.to_string(),
                actual.map_or_else(|| "none".to_string(), |p| p.to_string()),
                actual == Some(page),
            );
        }
    }

    /// Expectations the catalog's scoring shape never produces fail outright.
    fn unsupported(&mut self, fields: &[(&str, bool)]) {
        for &(field, present) in fields {
            if present {
                self.push(
                    field.to_string(),
                    "an expectation this tool produces".into(),
                    "not produced by this scoring shape".into(),
                    false,
                );
            }
        }
    }

    fn missing_category(&mut self, name: &str) {
        self.push(
            format!("categories.{}", name),
            "a scored category".into(),
            "not in catalog".into(),
            false,
        );
    }
}

/// Scan `fixture` and compare the result with its expectations.
pub fn run_fixture(name: &str, fixture: &ScenarioFixture, source: &CatalogSource) -> SpecResult<FixtureReport> {
    let tool = Tool::from_name(&fixture.tool).ok_or_else(|| SpecError::UnknownTool {
        fixture: name.to_string(),
        tool: fixture.tool.clone(),
    })?;
    let catalog = load_catalog(tool, source)?;
    let engine = ScanEngine::new(&catalog);
    let document = fixture.document(name);
    let expect = &fixture.expect;
    let mut checks = Checks::default();

    let axis_b_document = fixture.axis_b_document(name);

    let evidence = if catalog.scoring().is_dual_axis() {
        let result = match &axis_b_document {
            Some(axis_b) => engine.scan_dual_pair(&document, axis_b)?,
            None => engine.scan_dual(&document)?,
        };
        checks.score("differential", expect.differential, result.summary.overall_differential);
        checks.exact(
            "recommendation",
            expect.recommendation.as_deref(),
            result.summary.recommendation_label.as_str(),
        );
        checks.exact("total_matches", expect.total_matches, result.total_matches);
        checks.unsupported(&[
            ("overall_score", expect.overall_score.is_some()),
            ("classification", expect.classification.is_some()),
            ("compliance_issues", expect.compliance_issues.is_some()),
        ]);

        for category in &expect.categories {
            let Some(scored) = result.category(&category.name) else {
                checks.missing_category(&category.name);
                continue;
            };
            let field = |name: &str| ExpectedFailures::format_ref(&category.name, name);
            checks.score(field("axis_a"), category.axis_a, scored.axis_a_score);
            checks.score(field("axis_b"), category.axis_b, scored.axis_b_score);
            checks.score(field("score"), category.score, scored.differential);
            checks.evidence(category, &result.evidence);
        }
        result.evidence
    } else {
        let result = engine.scan(&document)?;
        checks.score("overall_score", expect.overall_score, result.overall_score.value());
        checks.exact(
            "classification",
            expect.classification.as_deref(),
            result.classification.as_str(),
        );
        checks.list("compliance_issues", expect.compliance_issues.as_ref(), &result.compliance_issues);
        checks.exact("total_matches", expect.total_matches, result.total_matches);
        checks.unsupported(&[
            ("recommendation", expect.recommendation.is_some()),
            ("differential", expect.differential.is_some()),
        ]);

        for category in &expect.categories {
            let Some(scored) = result.category(&category.name) else {
                checks.missing_category(&category.name);
                continue;
            };
            let field = |name: &str| ExpectedFailures::format_ref(&category.name, name);
            checks.score(field("score"), category.score, scored.score.value());
            checks.exact(field("positive"), category.positive, scored.positive_count);
            checks.exact(field("negative"), category.negative, scored.negative_count);
            checks.evidence(category, &result.evidence);
        }
        result.evidence
    };

    // Axis-B evidence of a paired fixture points into the other document.
    let drawn: Vec<Evidence> = match axis_b_document {
        Some(_) => evidence.into_iter().filter(|e| e.axis != Some(Axis::B)).collect(),
        None => evidence,
    };
    let rendered = (!document.full_text.contains('\n')).then(|| {
        let mut display = EvidenceDisplay::new(&document.full_text);
        display.include_all(&drawn);
        display.to_string()
    });

    Ok(FixtureReport {
        fixture: name.to_string(),
        tool,
        checks: checks.0,
        rendered,
    })
}

/// Outcome of a whole fixture directory.
#[derive(Debug, Clone, Default)]
pub struct HarnessRun {
    pub result: HarnessResult,
    pub reports: Vec<FixtureReport>,
    /// Formatted failures that are not listed as expected.
    pub regressions: Vec<String>,
}

/// Run every fixture under `dir`.
pub fn run_harness(dir: &Path, expected: &ExpectedFailures, source: &CatalogSource) -> SpecResult<HarnessRun> {
    let mut run = HarnessRun::default();

    for (name, fixture) in load_all_fixtures(dir)? {
        let report = run_fixture(&name, &fixture, source)?;
        for check in &report.checks {
            if check.passed {
                run.result.record_pass();
                continue;
            }
            let state = expected.is_expected(&report.fixture, &check.reference);
            run.result.record_failure(state);
            if state == crate::FailureState::Regression {
                tracing::warn!(fixture = %report.fixture, check = %check.reference, "regression");
                run.regressions.push(format_failure(&report, check));
            }
        }
        run.reports.push(report);
    }

    tracing::info!(
        fixtures = run.reports.len(),
        checks = run.result.total,
        regressions = run.result.regressions,
        "fixture harness finished"
    );

    Ok(run)
}
