//! Score values.
//!
//! Ratio-form and accumulation-form scores share the 0–10 range but mean
//! opposite things, so they are kept as distinct variants of [`Score`] and
//! never compare with each other.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Score reported for a category with no evidence.
pub const NEUTRAL_SCORE: f64 = 5.0;
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// A bounded category or overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Score {
    /// Ratio form: share of supporting evidence, higher is better.
    Compliance(f64),
    /// Accumulation form: weight of problematic evidence, higher is worse.
    Severity(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Compliance,
    Severity,
}

impl Score {
    /// Build a score of `kind`, clamped to `[0, 10]`.
    pub fn new(kind: ScoreKind, value: f64) -> Self {
        let value = clamp_score(value);
        match kind {
            ScoreKind::Compliance => Score::Compliance(value),
            ScoreKind::Severity => Score::Severity(value),
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Score::Compliance(v) | Score::Severity(v) => v,
        }
    }

    pub fn kind(self) -> ScoreKind {
        match self {
            Score::Compliance(_) => ScoreKind::Compliance,
            Score::Severity(_) => ScoreKind::Severity,
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Score::Compliance(a), Score::Compliance(b)) | (Score::Severity(a), Score::Severity(b)) => {
                a.partial_cmp(b)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Compliance(v) => write!(f, "compliance {:.1}", v),
            Score::Severity(v) => write!(f, "severity {:.1}", v),
        }
    }
}

/// Which end of the scale is the good one for a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    HigherIsBetter,
    HigherIsWorse,
}

impl Orientation {
    /// True when `score` is on the good side of (or at) `threshold`.
    pub fn favours(self, score: f64, threshold: f64) -> bool {
        match self {
            Orientation::HigherIsBetter => score >= threshold,
            Orientation::HigherIsWorse => score < threshold,
        }
    }
}

/// Score a category takes when no indicator matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbsencePolicy {
    /// Neither good nor bad: 5.0.
    #[default]
    Neutral,
    /// Bottom of the scale: 0.0.
    Minimum,
    /// Top of the scale: 10.0.
    Maximum,
}

impl AbsencePolicy {
    pub fn value(self) -> f64 {
        match self {
            AbsencePolicy::Neutral => NEUTRAL_SCORE,
            AbsencePolicy::Minimum => MIN_SCORE,
            AbsencePolicy::Maximum => MAX_SCORE,
        }
    }
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return NEUTRAL_SCORE;
    }
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub(crate) fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_of_different_kinds_do_not_compare() {
        let compliance = Score::Compliance(4.0);
        let severity = Score::Severity(4.0);
        assert_eq!(compliance.partial_cmp(&severity), None);
        assert_ne!(compliance, severity);
        assert!(Score::Compliance(3.0) < Score::Compliance(4.0));
    }

    #[test]
    fn construction_clamps() {
        assert_eq!(Score::new(ScoreKind::Severity, 12.5), Score::Severity(10.0));
        assert_eq!(Score::new(ScoreKind::Compliance, -1.0), Score::Compliance(0.0));
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Score::Severity(7.3).to_string(), @"severity 7.3");
        insta::assert_snapshot!(Score::Compliance(5.0).to_string(), @"compliance 5.0");
    }

    #[test]
    fn ties_round_away_from_zero() {
        // 1 positive against 7 negatives
        assert_eq!(round1(1.0 / 8.0 * 10.0), 1.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round2(0.5 + 0.15), 0.65);
    }

    #[test]
    fn orientation_sides() {
        assert!(Orientation::HigherIsBetter.favours(6.0, 6.0));
        assert!(!Orientation::HigherIsBetter.favours(5.9, 6.0));
        assert!(Orientation::HigherIsWorse.favours(5.9, 6.0));
        assert!(!Orientation::HigherIsWorse.favours(6.0, 6.0));
    }
}
