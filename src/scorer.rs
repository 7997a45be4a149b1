//! Single-axis scoring.
//!
//! Two formulas turn a category's evidence into a 0–10 score:
//!
//! - **Ratio** (risk and compliance tools): `positive / (positive + negative) × 10`.
//! - **Accumulation** (pure detection tools):
//!   `min(10, count × per_match + mean(severity weights))`.
//!
//! A category without evidence takes the value of its
//! [`AbsencePolicy`](crate::AbsencePolicy), neutral 5.0 unless configured
//! otherwise. Scores are rounded to one decimal, confidences to two.

use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;
use crate::rule::Polarity;
use crate::score::{clamp_score, round1, round2, AbsencePolicy, Orientation, Score, ScoreKind, MAX_SCORE};

fn default_saturation() -> f64 {
    10.0
}

fn default_per_match() -> f64 {
    0.5
}

fn default_negative_weight() -> f64 {
    1.5
}

/// Scoring formula declared by a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoringShape {
    Ratio {
        #[serde(default = "default_saturation")]
        confidence_saturation: f64,
    },
    Accumulation {
        #[serde(default = "default_per_match")]
        per_match: f64,
        #[serde(default = "default_saturation")]
        confidence_saturation: f64,
    },
    DualAxis {
        /// Extra weight of negative axis-B evidence.
        #[serde(default = "default_negative_weight")]
        negative_weight: f64,
        #[serde(default = "default_saturation")]
        confidence_saturation: f64,
    },
}

impl ScoringShape {
    pub fn is_dual_axis(&self) -> bool {
        matches!(self, ScoringShape::DualAxis { .. })
    }

    pub fn score_kind(&self) -> ScoreKind {
        match self {
            ScoringShape::Accumulation { .. } => ScoreKind::Severity,
            ScoringShape::Ratio { .. } | ScoringShape::DualAxis { .. } => ScoreKind::Compliance,
        }
    }

    pub fn default_orientation(&self) -> Orientation {
        match self {
            ScoringShape::Accumulation { .. } => Orientation::HigherIsWorse,
            ScoringShape::Ratio { .. } | ScoringShape::DualAxis { .. } => Orientation::HigherIsBetter,
        }
    }

    pub fn confidence_saturation(&self) -> f64 {
        match *self {
            ScoringShape::Ratio { confidence_saturation }
            | ScoringShape::Accumulation { confidence_saturation, .. }
            | ScoringShape::DualAxis { confidence_saturation, .. } => confidence_saturation,
        }
    }
}

/// Counts and severities of one category's evidence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub positive: usize,
    pub negative: usize,
    pub severity_weights: Vec<f64>,
}

impl Tally {
    pub fn record(&mut self, polarity: Polarity, severity_weight: f64) {
        match polarity {
            Polarity::Positive => self.positive += 1,
            Polarity::Negative => self.negative += 1,
        }
        self.severity_weights.push(severity_weight);
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

impl<'e> FromIterator<&'e Evidence> for Tally {
    fn from_iter<I: IntoIterator<Item = &'e Evidence>>(iter: I) -> Self {
        let mut tally = Tally::default();
        for item in iter {
            tally.record(item.polarity, item.severity_weight);
        }
        tally
    }
}

/// `positive / (positive + negative) × 10`, or the absence value.
pub fn ratio_score(positive: usize, negative: usize, absence: AbsencePolicy) -> f64 {
    weighted_ratio_score(positive, negative, 1.0, absence)
}

/// Ratio score with negative evidence counted `negative_weight` times.
pub fn weighted_ratio_score(
    positive: usize,
    negative: usize,
    negative_weight: f64,
    absence: AbsencePolicy,
) -> f64 {
    let denominator = positive as f64 + negative as f64 * negative_weight;
    if denominator <= 0.0 {
        return absence.value();
    }
    round1(clamp_score(positive as f64 / denominator * MAX_SCORE))
}

/// `min(10, count × per_match + mean(weights))`, or the absence value.
pub fn accumulation_score(severity_weights: &[f64], per_match: f64, absence: AbsencePolicy) -> f64 {
    if severity_weights.is_empty() {
        return absence.value();
    }
    let count = severity_weights.len() as f64;
    let mean = severity_weights.iter().sum::<f64>() / count;
    round1(clamp_score(count * per_match + mean))
}

/// `min(1, count / saturation)`.
pub fn confidence(count: usize, saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return if count > 0 { 1.0 } else { 0.0 };
    }
    round2((count as f64 / saturation).clamp(0.0, 1.0))
}

/// Score a single-axis category. Returns `None` for dual-axis shapes.
pub fn score_tally(shape: &ScoringShape, tally: &Tally, absence: AbsencePolicy) -> Option<(Score, f64)> {
    let value = match *shape {
        ScoringShape::Ratio { .. } => ratio_score(tally.positive, tally.negative, absence),
        ScoringShape::Accumulation { per_match, .. } => {
            accumulation_score(&tally.severity_weights, per_match, absence)
        }
        ScoringShape::DualAxis { .. } => return None,
    };
    let confidence = confidence(tally.total(), shape.confidence_saturation());
    Some((Score::new(shape.score_kind(), value), confidence))
}

/// Result of scoring one category on a single axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: Score,
    pub confidence: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Bounded, ordered subset of the category's evidence.
    pub supporting_evidence: Vec<Evidence>,
}

impl CategoryScore {
    pub fn match_count(&self) -> usize {
        self.positive_count + self.negative_count
    }

    pub fn has_evidence(&self) -> bool {
        self.match_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCUMULATE: ScoringShape = ScoringShape::Accumulation {
        per_match: 0.5,
        confidence_saturation: 10.0,
    };

    #[test]
    fn ratio_boundaries() {
        assert_eq!(ratio_score(0, 0, AbsencePolicy::Neutral), 5.0);
        assert_eq!(ratio_score(3, 0, AbsencePolicy::Neutral), 10.0);
        assert_eq!(ratio_score(0, 4, AbsencePolicy::Neutral), 0.0);
        assert_eq!(ratio_score(1, 2, AbsencePolicy::Neutral), 3.3);
        assert_eq!(ratio_score(0, 0, AbsencePolicy::Maximum), 10.0);
    }

    #[test]
    fn accumulation_is_capped() {
        assert_eq!(accumulation_score(&[], 0.5, AbsencePolicy::Neutral), 5.0);
        assert_eq!(accumulation_score(&[3.0], 0.5, AbsencePolicy::Neutral), 3.5);
        assert_eq!(accumulation_score(&[10.0, 10.0], 0.5, AbsencePolicy::Neutral), 10.0);
        assert_eq!(accumulation_score(&[1.0, 7.0], 0.5, AbsencePolicy::Neutral), 5.0);
    }

    #[test]
    fn accumulation_never_drops_for_an_equally_severe_instance() {
        let mut weights = vec![3.0, 7.0];
        let mut previous = accumulation_score(&weights, 0.5, AbsencePolicy::Neutral);
        for _ in 0..25 {
            let mean = weights.iter().sum::<f64>() / weights.len() as f64;
            weights.push(mean.max(7.0));
            let next = accumulation_score(&weights, 0.5, AbsencePolicy::Neutral);
            assert!(next >= previous, "{} dropped to {}", previous, next);
            assert!(next <= 10.0);
            previous = next;
        }
    }

    #[test]
    fn confidence_saturates() {
        assert_eq!(confidence(0, 10.0), 0.0);
        assert_eq!(confidence(3, 10.0), 0.3);
        assert_eq!(confidence(25, 10.0), 1.0);
    }

    #[test]
    fn tally_scoring_uses_the_shape_kind() {
        let mut tally = Tally::default();
        tally.record(Polarity::Negative, 7.0);
        let (score, confidence) = score_tally(&ACCUMULATE, &tally, AbsencePolicy::Neutral).unwrap();
        assert_eq!(score, Score::Severity(7.5));
        assert_eq!(confidence, 0.1);

        let ratio = ScoringShape::Ratio { confidence_saturation: 10.0 };
        let (score, _) = score_tally(&ratio, &tally, AbsencePolicy::Neutral).unwrap();
        assert_eq!(score, Score::Compliance(0.0));

        let dual = ScoringShape::DualAxis { negative_weight: 1.5, confidence_saturation: 10.0 };
        assert!(score_tally(&dual, &tally, AbsencePolicy::Neutral).is_none());
    }
}
