//! Evidence location: page lookup, context windows and specificity.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::document::PageLayout;
use crate::score::round2;

/// Default number of grapheme clusters kept on each side of a match.
pub const DEFAULT_CONTEXT_WINDOW: usize = 100;

/// Markers of a concrete, specific statement: explicit dates, worked
/// examples, and frequency words.
static DEFAULT_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
        r"(?i)\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{4}\b",
        r"(?i)\b(?:for\s+example|specifically|for\s+instance|such\s+as)\b",
        r"(?i)\b(?:every|each)\s+(?:day|week|month|morning|evening)\b|\b(?:daily|weekly|regularly)\b",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Where a match sits and what surrounds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Location<'t> {
    pub page_number: Option<u32>,
    pub context: &'t str,
}

/// Locate the match at `span` within `text`.
pub fn locate<'t>(
    text: &'t str,
    start: usize,
    end: usize,
    layout: &PageLayout,
    window: usize,
) -> Location<'t> {
    Location {
        page_number: layout.page_for_offset(start),
        context: context_window(text, start, end, window),
    }
}

/// `window` grapheme clusters either side of `start..end`, clipped to the
/// text and trimmed. `start` and `end` must be char boundaries.
pub fn context_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let end = end.min(text.len());
    let start = start.min(end);

    let from = if window == 0 {
        start
    } else {
        text[..start]
            .grapheme_indices(true)
            .rev()
            .take(window)
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(start)
    };
    let to = text[end..]
        .grapheme_indices(true)
        .nth(window)
        .map(|(idx, _)| end + idx)
        .unwrap_or(text.len());

    text[from..to].trim()
}

/// Relevance model for extraction catalogs: every specificity marker found
/// in the context adds `increment` to `base`, capped at 1.0.
#[derive(Debug, Clone)]
pub struct RelevanceModel {
    base: f64,
    increment: f64,
    markers: Vec<Regex>,
}

impl RelevanceModel {
    /// Uses the built-in markers when `markers` is empty.
    pub fn new(base: f64, increment: f64, markers: Vec<Regex>) -> Self {
        let markers = if markers.is_empty() {
            DEFAULT_MARKERS.clone()
        } else {
            markers
        };
        Self {
            base: base.clamp(0.0, 1.0),
            increment: increment.max(0.0),
            markers,
        }
    }

    /// Extra relevance earned by `context`, never pushing the total past 1.0.
    pub fn specificity_boost(&self, context: &str) -> f64 {
        let hits = self
            .markers
            .iter()
            .filter(|marker| marker.is_match(context))
            .count();
        round2((hits as f64 * self.increment).min(1.0 - self.base))
    }

    pub fn relevance(&self, boost: f64) -> f64 {
        round2((self.base + boost).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_symmetric_and_clipped() {
        let text = "0123456789abcdefghij";
        assert_eq!(context_window(text, 10, 12, 3), "789abcde");
        assert_eq!(context_window(text, 0, 2, 3), "01234");
        assert_eq!(context_window(text, 18, 20, 5), "defghij");
    }

    #[test]
    fn window_respects_grapheme_boundaries() {
        let text = "café – the family is incapable – naïve";
        let start = text.find("family").unwrap();
        let end = start + "family".len();
        let ctx = context_window(text, start, end, 6);
        assert_eq!(ctx, "– the family is in");
    }

    #[test]
    fn specificity_boost_is_capped() {
        let model = RelevanceModel::new(0.5, 0.15, Vec::new());
        assert_eq!(model.specificity_boost("nothing concrete here"), 0.0);
        let boost = model.specificity_boost("On 12/03/2021, for example, she visited daily");
        assert_eq!(boost, 0.45);
        assert_eq!(model.relevance(boost), 0.95);

        let greedy = RelevanceModel::new(0.7, 0.2, Vec::new());
        let boost = greedy.specificity_boost("On 12/03/2021, for example, she visited daily");
        assert_eq!(boost, 0.3);
        assert_eq!(greedy.relevance(boost), 1.0);
    }

    #[test]
    fn page_lookup_through_locate() {
        let layout = PageLayout::new(vec![(4, 5), (5, 5)]);
        let loc = locate("aaaaabbbbb", 7, 8, &layout, 1);
        assert_eq!(loc.page_number, Some(5));
        assert_eq!(loc.context, "bbb");
    }
}
