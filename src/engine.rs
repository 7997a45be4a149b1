//! The scan pipeline: match, locate, score, aggregate.

use std::thread;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ScanConfig;
use crate::document::SourceDocument;
use crate::dual_axis::{score_axes, summarize, AxisCounts, DualAxisCategoryScore, DualAxisSummary};
use crate::errors::ScanError;
use crate::evidence::{select_supporting, Evidence};
use crate::locator::locate;
use crate::matcher;
use crate::rule::{Axis, IndicatorRule, Polarity};
use crate::score::Score;
use crate::scorer::{confidence, score_tally, CategoryScore, ScoringShape, Tally};

/// Everything a single-axis scan produces for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub tool: String,
    pub document: String,
    /// One entry per catalog category, in catalog order.
    pub category_scores: Vec<CategoryScore>,
    pub overall_score: Score,
    pub classification: String,
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
    pub compliance_issues: Vec<String>,
    pub compliance_issue_count: usize,
    pub total_matches: usize,
    pub total_positive: usize,
    pub total_negative: usize,
    /// Categories with at least one match.
    pub categories_detected: usize,
    /// All evidence, rule order then text order.
    pub evidence: Vec<Evidence>,
}

impl ScanResult {
    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.category_scores.iter().find(|c| c.category == name)
    }
}

/// Everything a dual-axis scan produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualAxisScanResult {
    pub tool: String,
    pub document: String,
    pub categories: Vec<DualAxisCategoryScore>,
    pub summary: DualAxisSummary,
    pub total_matches: usize,
    pub evidence: Vec<Evidence>,
}

impl DualAxisScanResult {
    pub fn category(&self, name: &str) -> Option<&DualAxisCategoryScore> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// Scans documents against one compiled catalog.
///
/// The engine holds no per-scan state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct ScanEngine<'c> {
    catalog: &'c Catalog,
    config: ScanConfig,
}

impl<'c> ScanEngine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    fn context_window(&self) -> usize {
        self.config
            .context_window
            .unwrap_or(self.catalog.evidence_policy().context_window)
    }

    fn max_supporting(&self) -> usize {
        self.config
            .max_supporting
            .unwrap_or(self.catalog.evidence_policy().max_supporting)
    }

    /// Locate every match of the rules accepted by `keep`.
    pub fn collect_evidence<F>(&self, document: &SourceDocument, keep: F) -> Result<Vec<Evidence>, ScanError>
    where
        F: Fn(&IndicatorRule) -> bool,
    {
        let layout = document.layout()?;
        let window = self.context_window();
        let text = document.full_text.as_str();
        let relevance = self.catalog.relevance();

        let evidence = matcher::scan(text, self.catalog.rules().filter(|&rule| keep(rule)))
            .into_iter()
            .map(|found| {
                let location = locate(text, found.span.start, found.span.end, &layout, window);
                let (specificity_boost, relevance_score) = match relevance {
                    Some(model) => {
                        let boost = model.specificity_boost(location.context);
                        (boost, Some(model.relevance(boost)))
                    }
                    None => (0.0, None),
                };
                Evidence {
                    matched_text: found.matched_text.to_string(),
                    category: found.rule.category().to_string(),
                    polarity: found.rule.polarity(),
                    axis: found.rule.axis(),
                    start: found.span.start,
                    end: found.span.end,
                    page_number: location.page_number,
                    context: location.context.to_string(),
                    severity_weight: found.rule.severity_weight(),
                    specificity_boost,
                    relevance_score,
                }
            })
            .collect();

        Ok(evidence)
    }

    /// Single-axis scan of one document.
    pub fn scan(&self, document: &SourceDocument) -> Result<ScanResult, ScanError> {
        let shape = self.catalog.scoring();
        let ladder = self.catalog.ladder().ok_or_else(|| self.mismatch("single-axis"))?;

        let evidence = self.collect_evidence(document, |_| true)?;
        let order = self.catalog.evidence_policy().order;
        let limit = self.max_supporting();

        let category_scores = self
            .catalog
            .categories()
            .iter()
            .map(|category| -> Result<CategoryScore, ScanError> {
                let items: Vec<&Evidence> = evidence.iter().filter(|e| e.category == category.name).collect();
                let tally: Tally = items.iter().copied().collect();
                let (score, confidence) =
                    score_tally(shape, &tally, category.absence).ok_or_else(|| self.mismatch("single-axis"))?;
                Ok(CategoryScore {
                    category: category.name.clone(),
                    score,
                    confidence,
                    positive_count: tally.positive,
                    negative_count: tally.negative,
                    supporting_evidence: select_supporting(items, order, limit),
                })
            })
            .collect::<Result<Vec<_>, ScanError>>()?;

        let aggregate = self
            .catalog
            .aggregator()
            .aggregate(&category_scores, ladder, shape.score_kind());

        let total_positive: usize = category_scores.iter().map(|c| c.positive_count).sum();
        let total_negative: usize = category_scores.iter().map(|c| c.negative_count).sum();
        let categories_detected = category_scores.iter().filter(|c| c.has_evidence()).count();

        tracing::debug!(
            tool = %self.catalog.tool(),
            document = %document.name,
            matches = evidence.len(),
            overall = aggregate.overall_score.value(),
            classification = %aggregate.classification,
            "scanned document"
        );

        Ok(ScanResult {
            tool: self.catalog.tool().to_string(),
            document: document.name.clone(),
            category_scores,
            overall_score: aggregate.overall_score,
            classification: aggregate.classification,
            risk_factors: aggregate.risk_factors,
            protective_factors: aggregate.protective_factors,
            compliance_issues: aggregate.compliance_issues,
            compliance_issue_count: aggregate.compliance_issue_count,
            total_matches: evidence.len(),
            total_positive,
            total_negative,
            categories_detected,
            evidence,
        })
    }

    /// Dual-axis scan with both axes read from the same document.
    pub fn scan_dual(&self, document: &SourceDocument) -> Result<DualAxisScanResult, ScanError> {
        self.scan_dual_pair(document, document)
    }

    /// Dual-axis scan reading axis-A rules from `axis_a` and axis-B rules from `axis_b`.
    pub fn scan_dual_pair(
        &self,
        axis_a: &SourceDocument,
        axis_b: &SourceDocument,
    ) -> Result<DualAxisScanResult, ScanError> {
        let (negative_weight, saturation) = match *self.catalog.scoring() {
            ScoringShape::DualAxis {
                negative_weight,
                confidence_saturation,
            } => (negative_weight, confidence_saturation),
            _ => return Err(self.mismatch("dual-axis")),
        };
        let ladder = self
            .catalog
            .recommendation_ladder()
            .ok_or_else(|| self.mismatch("dual-axis"))?;

        let mut evidence = self.collect_evidence(axis_a, |rule| rule.axis() == Some(Axis::A))?;
        evidence.extend(self.collect_evidence(axis_b, |rule| rule.axis() == Some(Axis::B))?);

        let order = self.catalog.evidence_policy().order;
        let limit = self.max_supporting();

        let categories: Vec<DualAxisCategoryScore> = self
            .catalog
            .categories()
            .iter()
            .map(|category| {
                let items: Vec<&Evidence> = evidence.iter().filter(|e| e.category == category.name).collect();
                let counts = count_axes(&items);
                let scores = score_axes(&counts, negative_weight, category.absence);
                DualAxisCategoryScore {
                    category: category.name.clone(),
                    axis_a_score: scores.axis_a,
                    axis_b_score: scores.axis_b,
                    differential: scores.differential,
                    recommendation: ladder.recommend(scores.differential),
                    confidence: confidence(counts.total(), saturation),
                    counts,
                    evidence_for_a: select_supporting(
                        items
                            .iter()
                            .copied()
                            .filter(|e| e.axis == Some(Axis::A) && e.polarity == Polarity::Positive),
                        order,
                        limit,
                    ),
                    evidence_against_b: select_supporting(
                        items
                            .iter()
                            .copied()
                            .filter(|e| e.axis == Some(Axis::B) && e.polarity == Polarity::Negative),
                        order,
                        limit,
                    ),
                }
            })
            .collect();

        let summary = summarize(&categories, ladder);
        let document = if axis_a.name == axis_b.name {
            axis_a.name.clone()
        } else {
            format!("{} | {}", axis_a.name, axis_b.name)
        };

        tracing::debug!(
            tool = %self.catalog.tool(),
            document = %document,
            matches = evidence.len(),
            differential = summary.overall_differential,
            recommendation = %summary.recommendation_label,
            "scanned document on both axes"
        );

        Ok(DualAxisScanResult {
            tool: self.catalog.tool().to_string(),
            document,
            categories,
            summary,
            total_matches: evidence.len(),
            evidence,
        })
    }

    /// Scan each document independently. Results keep input order and a
    /// failed document does not affect the others.
    pub fn scan_batch(&self, documents: &[SourceDocument]) -> Vec<Result<ScanResult, ScanError>> {
        let results: Vec<Result<ScanResult, ScanError>> = if self.config.parallel && documents.len() > 1 {
            thread::scope(|scope| {
                let handles: Vec<_> = documents
                    .iter()
                    .map(|document| scope.spawn(move || self.scan(document)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                    .collect()
            })
        } else {
            documents.iter().map(|document| self.scan(document)).collect()
        };

        for (document, result) in documents.iter().zip(&results) {
            if let Err(error) = result {
                tracing::warn!(document = %document.name, %error, "document scan failed");
            }
        }

        results
    }

    fn mismatch(&self, requested: &'static str) -> ScanError {
        ScanError::ShapeMismatch {
            tool: self.catalog.tool().to_string(),
            requested,
        }
    }
}

fn count_axes(items: &[&Evidence]) -> AxisCounts {
    let mut counts = AxisCounts::default();
    for item in items {
        match (item.axis, item.polarity) {
            (Some(Axis::A), Polarity::Positive) => counts.a_positive += 1,
            (Some(Axis::A), Polarity::Negative) => counts.a_negative += 1,
            (Some(Axis::B), Polarity::Positive) => counts.b_positive += 1,
            (Some(Axis::B), Polarity::Negative) => counts.b_negative += 1,
            (None, _) => {}
        }
    }
    counts
}
