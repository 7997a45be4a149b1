//! Scenario fixtures.
//!
//! A fixture is a TOML file naming a tool, the document to scan and the
//! results the scan must produce. Only the expectations that are present
//! are checked, so a fixture can pin a single category score or a whole
//! result.
//!
//! ```toml
//! title = "Incapable family"
//! tool = "guardianship_risk"
//! text = "The family is incapable of providing care."
//!
//! [expect]
//! overall_score = 4.0
//! classification = "low_compliance"
//!
//! [[expect.categories]]
//! name = "family_involvement"
//! score = 0.0
//! evidence = ["family is incapable"]
//! ```

use evidence_scoring::SourceDocument;
use serde::Deserialize;

use crate::{SpecError, SpecResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioFixture {
    #[serde(default)]
    pub title: Option<String>,
    pub tool: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Page texts, used instead of `text` when page numbers matter.
    #[serde(default)]
    pub pages: Vec<String>,
    /// Second document for dual-axis pair scans; axis B is read from it.
    #[serde(default)]
    pub axis_b_text: Option<String>,
    #[serde(default)]
    pub expect: Expectations,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Expectations {
    pub overall_score: Option<f64>,
    pub classification: Option<String>,
    pub compliance_issues: Option<Vec<String>>,
    pub total_matches: Option<usize>,
    /// Dual-axis summary label.
    pub recommendation: Option<String>,
    pub differential: Option<f64>,
    #[serde(default)]
    pub categories: Vec<CategoryExpectation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryExpectation {
    pub name: String,
    pub score: Option<f64>,
    pub positive: Option<usize>,
    pub negative: Option<usize>,
    /// Dual-axis category scores.
    pub axis_a: Option<f64>,
    pub axis_b: Option<f64>,
    /// Matched texts that must appear among the category's evidence.
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Page the first evidence item must be located on.
    pub page: Option<u32>,
}

impl ScenarioFixture {
    /// Parse a fixture; `origin` names it in errors.
    pub fn parse(origin: &str, content: &str) -> SpecResult<Self> {
        let fixture: ScenarioFixture = toml::from_str(content).map_err(|e| SpecError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        if fixture.text.is_none() && fixture.pages.is_empty() {
            return Err(SpecError::Parse {
                path: origin.to_string(),
                message: "a fixture needs `text` or `pages`".into(),
            });
        }
        Ok(fixture)
    }

    pub fn document(&self, name: &str) -> SourceDocument {
        match &self.text {
            Some(text) if self.pages.is_empty() => SourceDocument::new(name, text.as_str()),
            _ => SourceDocument::from_pages(name, self.pages.iter().map(String::as_str)),
        }
    }

    pub fn axis_b_document(&self, name: &str) -> Option<SourceDocument> {
        self.axis_b_text
            .as_deref()
            .map(|text| SourceDocument::new(format!("{} (axis b)", name), text))
    }

    /// Display name: the title when present, else `fallback`.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}
