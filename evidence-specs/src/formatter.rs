//! Failure and summary formatting.

use crate::failures::HarnessResult;
use crate::runner::{Check, FixtureReport};

/// Format a failed check, with the document's evidence drawn underneath
/// the text when the document fits on one line.
pub fn format_failure(report: &FixtureReport, check: &Check) -> String {
    let mut output = format!("\nFAIL: {} [{}] ({})\n\n", report.fixture, check.reference, report.tool);

    if let Some(rendered) = &report.rendered {
        for line in rendered.lines() {
            output.push_str("  ");
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "  \u{2717} expected `{}`, found `{}`\n",
        check.expected, check.actual
    ));
    output
}

pub fn format_summary(result: &HarnessResult) -> String {
    format!(
        "{} checks: {} passed, {} expected failures, {} regressions",
        result.total, result.passed, result.expected_failures, result.regressions
    )
}
