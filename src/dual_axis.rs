//! Dual-axis scoring: the same category judged from two perspectives.
//!
//! Axis A uses the plain ratio. Axis B penalises negative evidence with an
//! asymmetric weight, so two positives and two negatives score 5.0 on axis A
//! but 4.0 on axis B under the default weight of 1.5.

use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;
use crate::ladder::{Recommendation, RecommendationLadder};
use crate::score::{round1, AbsencePolicy};
use crate::scorer::{ratio_score, weighted_ratio_score};

/// Evidence counts for one category on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCounts {
    pub a_positive: usize,
    pub a_negative: usize,
    pub b_positive: usize,
    pub b_negative: usize,
}

impl AxisCounts {
    pub fn total(&self) -> usize {
        self.a_positive + self.a_negative + self.b_positive + self.b_negative
    }
}

/// Axis scores and their differential, each rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualScores {
    pub axis_a: f64,
    pub axis_b: f64,
    pub differential: f64,
}

/// Score both axes. Axis scores are rounded before the differential is taken.
pub fn score_axes(counts: &AxisCounts, negative_weight: f64, absence: AbsencePolicy) -> DualScores {
    let axis_a = ratio_score(counts.a_positive, counts.a_negative, absence);
    let axis_b = weighted_ratio_score(counts.b_positive, counts.b_negative, negative_weight, absence);
    DualScores {
        axis_a,
        axis_b,
        differential: round1(axis_a - axis_b),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualAxisCategoryScore {
    pub category: String,
    pub axis_a_score: f64,
    pub axis_b_score: f64,
    /// `axis_a_score - axis_b_score`.
    pub differential: f64,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub counts: AxisCounts,
    /// Positive axis-A evidence, bounded.
    pub evidence_for_a: Vec<Evidence>,
    /// Negative axis-B evidence, bounded.
    pub evidence_against_b: Vec<Evidence>,
}

/// Document-level roll-up of dual-axis categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualAxisSummary {
    pub overall_axis_a: f64,
    pub overall_axis_b: f64,
    /// Mean of the per-category differentials.
    pub overall_differential: f64,
    pub recommendation: Recommendation,
    pub recommendation_label: String,
}

/// Roll up per-category dual scores. An empty slice is neutral.
pub fn summarize(categories: &[DualAxisCategoryScore], ladder: &RecommendationLadder) -> DualAxisSummary {
    let (overall_axis_a, overall_axis_b, overall_differential) = if categories.is_empty() {
        (AbsencePolicy::Neutral.value(), AbsencePolicy::Neutral.value(), 0.0)
    } else {
        let n = categories.len() as f64;
        (
            round1(categories.iter().map(|c| c.axis_a_score).sum::<f64>() / n),
            round1(categories.iter().map(|c| c.axis_b_score).sum::<f64>() / n),
            round1(categories.iter().map(|c| c.differential).sum::<f64>() / n),
        )
    };
    let recommendation = ladder.recommend(overall_differential);
    DualAxisSummary {
        overall_axis_a,
        overall_axis_b,
        overall_differential,
        recommendation,
        recommendation_label: ladder.label(recommendation).to_string(),
    }
}
