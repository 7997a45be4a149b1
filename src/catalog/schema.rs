//! Serialized form of an indicator catalog.
//!
//! Catalogs are written in RON. Everything that does not change the meaning
//! of a category (evidence window, list bounds, floors) has a default so that
//! small catalogs stay small.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregationPolicy;
use crate::evidence::EvidenceOrder;
use crate::ladder::{RecommendationLabels, Rung};
use crate::locator::DEFAULT_CONTEXT_WINDOW;
use crate::rule::{Axis, Polarity};
use crate::score::{AbsencePolicy, Orientation};
use crate::scorer::ScoringShape;

fn one() -> f64 {
    1.0
}

fn default_strong() -> f64 {
    2.0
}

fn default_lean() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Catalog")]
pub struct CatalogSpec {
    pub tool: String,
    #[serde(default)]
    pub title: String,
    pub scoring: ScoringShape,
    pub classification: ClassificationSpec,
    /// Defaults from the scoring shape.
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub aggregation: AggregationPolicy,
    #[serde(default)]
    pub evidence: EvidencePolicy,
    #[serde(default)]
    pub relevance: Option<RelevanceSpec>,
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassificationSpec {
    /// Single-axis label ladder.
    Ladder { rungs: Vec<Rung>, otherwise: String },
    /// Dual-axis differential ladder.
    Recommendation {
        #[serde(default = "default_strong")]
        strong: f64,
        #[serde(default = "default_lean")]
        lean: f64,
        #[serde(default)]
        labels: RecommendationLabels,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidencePolicy {
    /// Grapheme clusters kept either side of a match.
    pub context_window: usize,
    pub max_supporting: usize,
    pub order: EvidenceOrder,
}

impl Default for EvidencePolicy {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            max_supporting: 5,
            order: EvidenceOrder::FirstFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceSpec {
    pub base: f64,
    pub increment: f64,
    /// Empty uses the built-in specificity markers.
    #[serde(default)]
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    /// Human-readable name, e.g. "More Choice and Control".
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Remediation advice handed to the narrative layer.
    #[serde(default)]
    pub guidance: String,
    /// Legal or narrative reference, e.g. a statute section.
    #[serde(default)]
    pub reference: String,
    #[serde(default = "one")]
    pub weight: f64,
    #[serde(default)]
    pub absence: AbsencePolicy,
    pub indicators: Vec<IndicatorSetSpec>,
}

/// Patterns sharing polarity, axis and severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSetSpec {
    pub polarity: Polarity,
    #[serde(default)]
    pub axis: Option<Axis>,
    #[serde(default = "one")]
    pub severity: f64,
    pub patterns: Vec<String>,
}
