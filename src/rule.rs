//! Indicator rules: a compiled pattern tagged with the category it counts
//! towards, its polarity, an optional axis and a severity weight.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// Whether a match supports or undermines the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Perspective being scored in dual-axis catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    A,
    B,
}

/// A single compiled indicator.
#[derive(Debug, Clone)]
pub struct IndicatorRule {
    category: String,
    pattern: Regex,
    polarity: Polarity,
    axis: Option<Axis>,
    severity_weight: f64,
}

impl IndicatorRule {
    /// Compile `source` case-insensitively.
    ///
    /// A pattern that does not compile, or that matches the empty string, is
    /// a [`ConfigurationError`]. Rules are only ever built while a catalog is
    /// loaded, so a bad pattern can never surface during a scan.
    pub fn compile(
        category: &str,
        source: &str,
        polarity: Polarity,
        axis: Option<Axis>,
        severity_weight: f64,
    ) -> Result<Self, ConfigurationError> {
        let pattern = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|source_err| ConfigurationError::InvalidPattern {
                category: category.to_string(),
                pattern: source.to_string(),
                source: source_err,
            })?;
        if pattern.is_match("") {
            return Err(ConfigurationError::EmptyMatch {
                category: category.to_string(),
                pattern: source.to_string(),
            });
        }

        Ok(Self {
            category: category.to_string(),
            pattern,
            polarity,
            axis,
            severity_weight,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The pattern text as written in the catalog.
    pub fn source(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub fn severity_weight(&self) -> f64 {
        self.severity_weight
    }
}
