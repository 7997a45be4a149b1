//! Evidence items and supporting-evidence selection.

use serde::{Deserialize, Serialize};

use crate::rule::{Axis, Polarity};

/// A located, contextualised match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub matched_text: String,
    pub category: String,
    pub polarity: Polarity,
    pub axis: Option<Axis>,
    pub start: usize,
    pub end: usize,
    pub page_number: Option<u32>,
    pub context: String,
    pub severity_weight: f64,
    pub specificity_boost: f64,
    /// Only set for catalogs with a relevance model.
    pub relevance_score: Option<f64>,
}

/// How supporting evidence is ordered before it is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvidenceOrder {
    /// Rule declaration order, then text order.
    #[default]
    FirstFound,
    /// Highest specificity boost first; ties keep first-found order.
    MostSpecific,
}

/// Order `items` by `order` and keep at most `limit`.
pub fn select_supporting<'e, I>(items: I, order: EvidenceOrder, limit: usize) -> Vec<Evidence>
where
    I: IntoIterator<Item = &'e Evidence>,
{
    let mut selected: Vec<&Evidence> = items.into_iter().collect();
    if order == EvidenceOrder::MostSpecific {
        selected.sort_by(|a, b| {
            b.specificity_boost
                .partial_cmp(&a.specificity_boost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    selected.into_iter().take(limit).cloned().collect()
}
