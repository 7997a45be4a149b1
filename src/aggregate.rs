//! Document-level aggregation of category scores.

use serde::{Deserialize, Serialize};

use crate::ladder::Ladder;
use crate::score::{round1, Orientation, Score, ScoreKind, NEUTRAL_SCORE};
use crate::scorer::CategoryScore;

/// Whether a score sitting exactly on the issue floor counts as an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FloorBoundary {
    /// A score equal to the floor is not an issue.
    #[default]
    Exclusive,
    /// A score equal to the floor is an issue.
    Inclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    pub issue_floor: f64,
    pub floor_boundary: FloorBoundary,
    /// Splits protective factors from risk factors.
    pub factor_threshold: f64,
    /// Bound on each ranked list.
    pub max_listed: usize,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            issue_floor: 5.0,
            floor_boundary: FloorBoundary::Exclusive,
            factor_threshold: 6.0,
            max_listed: 5,
        }
    }
}

/// Overall score, label and ranked factor lists for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub overall_score: Score,
    pub classification: String,
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
    pub compliance_issues: Vec<String>,
    /// Not bounded by `max_listed`.
    pub compliance_issue_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregator {
    policy: AggregationPolicy,
    orientation: Orientation,
}

impl Aggregator {
    pub fn new(policy: AggregationPolicy, orientation: Orientation) -> Self {
        Self { policy, orientation }
    }

    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True when `score` is on the bad side of the issue floor.
    pub fn is_issue(&self, score: f64) -> bool {
        let floor = self.policy.issue_floor;
        match (self.orientation, self.policy.floor_boundary) {
            (Orientation::HigherIsBetter, FloorBoundary::Exclusive) => score < floor,
            (Orientation::HigherIsBetter, FloorBoundary::Inclusive) => score <= floor,
            (Orientation::HigherIsWorse, FloorBoundary::Exclusive) => score > floor,
            (Orientation::HigherIsWorse, FloorBoundary::Inclusive) => score >= floor,
        }
    }

    /// True when `score` counts as a protective factor.
    pub fn is_protective(&self, score: f64) -> bool {
        self.orientation.favours(score, self.policy.factor_threshold)
    }

    /// Mean of `values` rounded to one decimal, neutral when empty.
    pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        if count == 0 {
            NEUTRAL_SCORE
        } else {
            round1(sum / count as f64)
        }
    }

    /// Combine category scores, in catalog order.
    pub fn aggregate(&self, scores: &[CategoryScore], ladder: &Ladder, kind: ScoreKind) -> Aggregate {
        let overall = Self::mean(scores.iter().map(|s| s.score.value()));

        let mut risk_factors = Vec::new();
        let mut protective_factors = Vec::new();
        let mut compliance_issues = Vec::new();

        for category in scores {
            let value = category.score.value();
            if self.is_protective(value) {
                protective_factors.push(category.category.clone());
            } else {
                risk_factors.push(category.category.clone());
            }
            if self.is_issue(value) {
                compliance_issues.push(category.category.clone());
            }
        }

        let compliance_issue_count = compliance_issues.len();
        let bound = self.policy.max_listed;
        risk_factors.truncate(bound);
        protective_factors.truncate(bound);
        compliance_issues.truncate(bound);

        Aggregate {
            overall_score: Score::new(kind, overall),
            classification: ladder.classify(overall).to_string(),
            risk_factors,
            protective_factors,
            compliance_issues,
            compliance_issue_count,
        }
    }
}
