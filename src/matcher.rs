//! Applies indicator rules to a text body.

use std::ops::Range;

use crate::rule::IndicatorRule;

/// One occurrence of a rule's pattern in the scanned text.
#[derive(Debug, Clone)]
pub struct RuleMatch<'r, 't> {
    pub rule: &'r IndicatorRule,
    pub matched_text: &'t str,
    pub span: Range<usize>,
}

/// Run every rule over `text`.
///
/// Matches are grouped by rule in the order the rules are given and, within
/// a rule, appear in text order. Matches of different rules may overlap and
/// are all kept. Empty or whitespace-only text never matches.
pub fn scan<'r, 't, I>(text: &'t str, rules: I) -> Vec<RuleMatch<'r, 't>>
where
    I: IntoIterator<Item = &'r IndicatorRule>,
{
    if text.trim().is_empty() {
        return Vec::new();
    }

    rules
        .into_iter()
        .flat_map(|rule| {
            rule.pattern().find_iter(text).map(move |m| RuleMatch {
                rule,
                matched_text: m.as_str(),
                span: m.range(),
            })
        })
        .collect()
}
