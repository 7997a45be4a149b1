//! Compiled indicator catalogs.
//!
//! A [`CatalogSpec`] is the declarative form read from RON; [`Catalog`] is
//! the validated, compiled form the engine scans with. Compilation is the
//! only place a catalog can fail, and every failure is a
//! [`ConfigurationError`].

mod schema;

use std::fs;
use std::path::Path;

use regex::Regex;

pub use schema::{
    CatalogSpec, CategorySpec, ClassificationSpec, EvidencePolicy, IndicatorSetSpec, RelevanceSpec,
};

use crate::aggregate::{AggregationPolicy, Aggregator};
use crate::errors::{ConfigResult, ConfigurationError};
use crate::ladder::{Ladder, RecommendationLadder};
use crate::locator::RelevanceModel;
use crate::rule::IndicatorRule;
use crate::score::{AbsencePolicy, Orientation};
use crate::scorer::ScoringShape;

/// A named category and its rules, in declaration order.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub title: String,
    pub description: String,
    pub guidance: String,
    pub reference: String,
    pub weight: f64,
    pub absence: AbsencePolicy,
    pub rules: Vec<IndicatorRule>,
}

#[derive(Debug, Clone)]
pub enum Classification {
    Ladder(Ladder),
    Recommendation(RecommendationLadder),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    tool: String,
    title: String,
    scoring: ScoringShape,
    classification: Classification,
    orientation: Orientation,
    aggregation: AggregationPolicy,
    evidence: EvidencePolicy,
    relevance: Option<RelevanceModel>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Parse and compile a RON catalog. `origin` names the source in errors.
    pub fn from_ron(origin: &str, source: &str) -> ConfigResult<Self> {
        let spec: CatalogSpec = ron::from_str(source).map_err(|e| ConfigurationError::Schema {
            catalog: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::compile(spec)
    }

    /// Read and compile a RON catalog file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&path.display().to_string(), &source)
    }

    pub fn compile(spec: CatalogSpec) -> ConfigResult<Self> {
        if spec.categories.is_empty() {
            return Err(ConfigurationError::NoCategories { catalog: spec.tool });
        }
        validate_shape(&spec.scoring)?;
        validate_policies(&spec)?;

        let dual_axis = spec.scoring.is_dual_axis();
        let classification = match (spec.classification, dual_axis) {
            (ClassificationSpec::Ladder { rungs, otherwise }, false) => {
                Classification::Ladder(Ladder::new(rungs, otherwise)?)
            }
            (ClassificationSpec::Recommendation { strong, lean, labels }, true) => {
                Classification::Recommendation(RecommendationLadder::new(strong, lean, labels)?)
            }
            (_, dual) => {
                return Err(ConfigurationError::InvalidSetting {
                    setting: "classification",
                    message: if dual {
                        "dual-axis scoring needs a Recommendation classification".into()
                    } else {
                        "single-axis scoring needs a Ladder classification".into()
                    },
                })
            }
        };

        let relevance = match spec.relevance {
            Some(relevance) => Some(compile_relevance(relevance)?),
            None => None,
        };

        let mut categories: Vec<Category> = Vec::with_capacity(spec.categories.len());
        for category in spec.categories {
            if category.name.trim().is_empty() {
                return Err(ConfigurationError::InvalidSetting {
                    setting: "categories.name",
                    message: "category names must not be empty".into(),
                });
            }
            if categories.iter().any(|c| c.name == category.name) {
                return Err(ConfigurationError::DuplicateCategory {
                    category: category.name,
                });
            }
            categories.push(compile_category(category, dual_axis)?);
        }

        let catalog = Self {
            orientation: spec
                .orientation
                .unwrap_or_else(|| spec.scoring.default_orientation()),
            tool: spec.tool,
            title: spec.title,
            scoring: spec.scoring,
            classification,
            aggregation: spec.aggregation,
            evidence: spec.evidence,
            relevance,
            categories,
        };

        tracing::info!(
            tool = %catalog.tool,
            categories = catalog.categories.len(),
            rules = catalog.rule_count(),
            "compiled indicator catalog"
        );

        Ok(catalog)
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scoring(&self) -> &ScoringShape {
        &self.scoring
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn ladder(&self) -> Option<&Ladder> {
        match &self.classification {
            Classification::Ladder(ladder) => Some(ladder),
            Classification::Recommendation(_) => None,
        }
    }

    pub fn recommendation_ladder(&self) -> Option<&RecommendationLadder> {
        match &self.classification {
            Classification::Recommendation(ladder) => Some(ladder),
            Classification::Ladder(_) => None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn aggregation(&self) -> &AggregationPolicy {
        &self.aggregation
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.aggregation.clone(), self.orientation)
    }

    pub fn evidence_policy(&self) -> &EvidencePolicy {
        &self.evidence
    }

    pub fn relevance(&self) -> Option<&RelevanceModel> {
        self.relevance.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All rules, grouped by category in catalog order.
    pub fn rules(&self) -> impl Iterator<Item = &IndicatorRule> {
        self.categories.iter().flat_map(|c| c.rules.iter())
    }

    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// `(category, guidance)` for each named category that carries guidance,
    /// in the order the names are given. Unknown names are skipped.
    pub fn guidance_for<I, S>(&self, names: I) -> Vec<(&str, &str)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.category(name.as_ref()))
            .filter(|category| !category.guidance.is_empty())
            .map(|category| (category.name.as_str(), category.guidance.as_str()))
            .collect()
    }
}

fn compile_category(spec: CategorySpec, dual_axis: bool) -> ConfigResult<Category> {
    let mut rules = Vec::new();
    for set in &spec.indicators {
        match (dual_axis, set.axis) {
            (true, None) => {
                return Err(ConfigurationError::AxisMismatch {
                    category: spec.name.clone(),
                    message: "dual-axis catalogs need an axis on every indicator set".into(),
                })
            }
            (false, Some(_)) => {
                return Err(ConfigurationError::AxisMismatch {
                    category: spec.name.clone(),
                    message: "axis tags are only allowed in dual-axis catalogs".into(),
                })
            }
            _ => {}
        }
        if !(set.severity.is_finite() && set.severity >= 0.0) {
            return Err(ConfigurationError::InvalidSetting {
                setting: "indicators.severity",
                message: format!("`{}` has severity {}", spec.name, set.severity),
            });
        }
        for pattern in &set.patterns {
            rules.push(IndicatorRule::compile(
                &spec.name,
                pattern,
                set.polarity,
                set.axis,
                set.severity,
            )?);
        }
    }

    if rules.is_empty() {
        return Err(ConfigurationError::EmptyCategory { category: spec.name });
    }
    if !(spec.weight.is_finite() && spec.weight >= 0.0) {
        return Err(ConfigurationError::InvalidSetting {
            setting: "categories.weight",
            message: format!("`{}` has weight {}", spec.name, spec.weight),
        });
    }

    Ok(Category {
        name: spec.name,
        title: spec.title,
        description: spec.description,
        guidance: spec.guidance,
        reference: spec.reference,
        weight: spec.weight,
        absence: spec.absence,
        rules,
    })
}

fn compile_relevance(spec: RelevanceSpec) -> ConfigResult<RelevanceModel> {
    if !(0.0..=1.0).contains(&spec.base) || !(spec.increment.is_finite() && spec.increment >= 0.0) {
        return Err(ConfigurationError::InvalidSetting {
            setting: "relevance",
            message: format!("base must be in [0, 1] and increment >= 0, got {} / {}", spec.base, spec.increment),
        });
    }
    let markers = spec
        .markers
        .iter()
        .map(|marker| {
            Regex::new(&format!("(?i){}", marker)).map_err(|source| ConfigurationError::InvalidPattern {
                category: "relevance.markers".into(),
                pattern: marker.clone(),
                source,
            })
        })
        .collect::<ConfigResult<Vec<_>>>()?;
    Ok(RelevanceModel::new(spec.base, spec.increment, markers))
}

fn validate_shape(shape: &ScoringShape) -> ConfigResult<()> {
    let invalid = |setting: &'static str, value: f64| ConfigurationError::InvalidSetting {
        setting,
        message: format!("expected a positive finite number, got {}", value),
    };
    let saturation = shape.confidence_saturation();
    if !(saturation.is_finite() && saturation > 0.0) {
        return Err(invalid("scoring.confidence_saturation", saturation));
    }
    match *shape {
        ScoringShape::Accumulation { per_match, .. } if !(per_match.is_finite() && per_match >= 0.0) => {
            Err(invalid("scoring.per_match", per_match))
        }
        ScoringShape::DualAxis { negative_weight, .. }
            if !(negative_weight.is_finite() && negative_weight > 0.0) =>
        {
            Err(invalid("scoring.negative_weight", negative_weight))
        }
        _ => Ok(()),
    }
}

fn validate_policies(spec: &CatalogSpec) -> ConfigResult<()> {
    let in_range = |value: f64| (0.0..=10.0).contains(&value);
    if !in_range(spec.aggregation.issue_floor) {
        return Err(ConfigurationError::InvalidSetting {
            setting: "aggregation.issue_floor",
            message: format!("{} is outside [0, 10]", spec.aggregation.issue_floor),
        });
    }
    if !in_range(spec.aggregation.factor_threshold) {
        return Err(ConfigurationError::InvalidSetting {
            setting: "aggregation.factor_threshold",
            message: format!("{} is outside [0, 10]", spec.aggregation.factor_threshold),
        });
    }
    if spec.evidence.max_supporting == 0 {
        return Err(ConfigurationError::InvalidSetting {
            setting: "evidence.max_supporting",
            message: "at least one supporting evidence item must be kept".into(),
        });
    }
    Ok(())
}
