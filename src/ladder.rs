//! Table-driven classification ladders.
//!
//! A [`Ladder`] maps a score onto the label of the first rung whose
//! `at_least` bound the score reaches, falling back to `otherwise`.
//! A [`RecommendationLadder`] does the same for signed dual-axis
//! differentials.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    pub at_least: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    rungs: Vec<Rung>,
    otherwise: String,
}

impl Ladder {
    /// Rungs must be strictly descending.
    pub fn new(rungs: Vec<Rung>, otherwise: impl Into<String>) -> Result<Self, ConfigurationError> {
        for pair in rungs.windows(2) {
            if !(pair[0].at_least > pair[1].at_least) {
                return Err(ConfigurationError::LadderOrder {
                    previous: pair[0].at_least,
                    next: pair[1].at_least,
                });
            }
        }
        Ok(Self {
            rungs,
            otherwise: otherwise.into(),
        })
    }

    pub fn classify(&self, score: f64) -> &str {
        self.rungs
            .iter()
            .find(|rung| score >= rung.at_least)
            .map(|rung| rung.label.as_str())
            .unwrap_or(&self.otherwise)
    }
}

/// Direction and strength of a dual-axis differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongA,
    A,
    Neutral,
    B,
    StrongB,
}

/// Labels the narrative layer shows for each [`Recommendation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLabels {
    pub strong_a: String,
    pub a: String,
    pub neutral: String,
    pub b: String,
    pub strong_b: String,
}

impl Default for RecommendationLabels {
    fn default() -> Self {
        Self {
            strong_a: "strong_a".into(),
            a: "a".into(),
            neutral: "neutral".into(),
            b: "b".into(),
            strong_b: "strong_b".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLadder {
    strong: f64,
    lean: f64,
    labels: RecommendationLabels,
}

impl Default for RecommendationLadder {
    fn default() -> Self {
        Self {
            strong: 2.0,
            lean: 0.5,
            labels: RecommendationLabels::default(),
        }
    }
}

impl RecommendationLadder {
    /// Requires `strong >= lean > 0`.
    pub fn new(strong: f64, lean: f64, labels: RecommendationLabels) -> Result<Self, ConfigurationError> {
        if !(lean > 0.0 && strong >= lean && strong.is_finite()) {
            return Err(ConfigurationError::InvalidSetting {
                setting: "classification.strong/lean",
                message: format!("expected strong >= lean > 0, got strong={} lean={}", strong, lean),
            });
        }
        Ok(Self { strong, lean, labels })
    }

    pub fn recommend(&self, differential: f64) -> Recommendation {
        if differential >= self.strong {
            Recommendation::StrongA
        } else if differential >= self.lean {
            Recommendation::A
        } else if differential <= -self.strong {
            Recommendation::StrongB
        } else if differential <= -self.lean {
            Recommendation::B
        } else {
            Recommendation::Neutral
        }
    }

    pub fn label(&self, recommendation: Recommendation) -> &str {
        match recommendation {
            Recommendation::StrongA => &self.labels.strong_a,
            Recommendation::A => &self.labels.a,
            Recommendation::Neutral => &self.labels.neutral,
            Recommendation::B => &self.labels.b,
            Recommendation::StrongB => &self.labels.strong_b,
        }
    }
}
