//! Evidence-weighted pattern scoring.
//!
//! Documents are judged against catalogs of hand-authored indicators
//! (patterns signalling bias, rights breaches, compliance failures or goal
//! alignment). Every match becomes located [`Evidence`]; evidence is scored
//! per category, and category scores are rolled up into an overall score,
//! a classification label and ranked factor lists.
//!
//! ## Pipeline
//!
//! - [`matcher`] - applies every rule of a catalog to the document text
//! - [`locator`] - page lookup, context windows and specificity boosts
//! - [`scorer`] - ratio and accumulation scoring of a single category
//! - [`dual_axis`] - the same category scored from two perspectives
//! - [`aggregate`] - overall score, classification and factor lists
//! - [`ScanEngine`] - runs the pipeline for a document, a pair or a batch
//!
//! ## Catalogs
//!
//! Catalogs are declarative RON documents compiled by [`Catalog::from_ron`].
//! A pattern that does not compile is a [`ConfigurationError`]; scans never
//! fail on catalog content.
//!
//! ## Example
//!
//! ```
//! use evidence_scoring::{Catalog, ScanEngine, SourceDocument};
//!
//! let catalog = Catalog::from_ron("inline", r#"Catalog(
//!     tool: "family",
//!     scoring: Ratio(confidence_saturation: 10.0),
//!     classification: Ladder(rungs: [(at_least: 6.0, label: "supported")], otherwise: "unsupported"),
//!     categories: [(
//!         name: "family_involvement",
//!         indicators: [
//!             (polarity: Positive, patterns: [r"family\s+supports?"]),
//!             (polarity: Negative, patterns: [r"family\s+(?:is\s+)?incapable"]),
//!         ],
//!     )],
//! )"#).unwrap();
//!
//! let doc = SourceDocument::new("note", "The family is incapable of providing care.");
//! let result = ScanEngine::new(&catalog).scan(&doc).unwrap();
//! assert_eq!(result.category("family_involvement").unwrap().score.value(), 0.0);
//! assert_eq!(result.classification, "unsupported");
//! ```

pub mod aggregate;
pub mod catalog;
mod config;
mod display;
mod document;
pub mod dual_axis;
mod engine;
mod errors;
mod evidence;
pub mod ladder;
pub mod locator;
pub mod matcher;
mod rule;
mod score;
pub mod scorer;

pub use aggregate::{Aggregate, AggregationPolicy, Aggregator, FloorBoundary};
pub use catalog::{Catalog, CatalogSpec, Category, Classification, EvidencePolicy};
pub use config::ScanConfig;
pub use display::EvidenceDisplay;
pub use document::{Page, PageLayout, SourceDocument};
pub use dual_axis::{AxisCounts, DualAxisCategoryScore, DualAxisSummary};
pub use engine::{DualAxisScanResult, ScanEngine, ScanResult};
pub use errors::{ConfigResult, ConfigurationError, ScanError};
pub use evidence::{Evidence, EvidenceOrder};
pub use ladder::{Ladder, Recommendation, RecommendationLadder, Rung};
pub use rule::{Axis, IndicatorRule, Polarity};
pub use score::{AbsencePolicy, Orientation, Score, ScoreKind, NEUTRAL_SCORE};
pub use scorer::{CategoryScore, ScoringShape};

#[cfg(test)]
mod tests {
    mod aggregate;
    mod catalog;
    mod display;
    mod engine;
}
