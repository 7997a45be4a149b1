//! Documents as handed over by the extraction collaborator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ScanError;

/// One page of extracted text. Only its length is used for page lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: u32,
    pub text: String,
}

/// Extracted text of a document plus its per-page texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Free-form identifier used in logs and errors.
    #[serde(default)]
    pub name: String,
    pub full_text: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_text: full_text.into(),
            pages: Vec::new(),
        }
    }

    /// Build a document whose full text is its pages joined by blank lines.
    pub fn from_pages<I, S>(name: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<Page> = pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Page {
                page_number: idx as u32 + 1,
                text: text.into(),
            })
            .collect();
        let full_text = pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        Self {
            name: name.into(),
            full_text,
            pages,
        }
    }

    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        self
    }

    /// Cumulative page lengths for offset lookup.
    pub fn layout(&self) -> Result<PageLayout, ScanError> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(page.page_number) {
                return Err(ScanError::DuplicatePage {
                    document: self.name.clone(),
                    page_number: page.page_number,
                });
            }
        }
        Ok(PageLayout::new(
            self.pages.iter().map(|page| (page.page_number, page.text.len())),
        ))
    }
}

/// Page numbers paired with the cumulative byte length up to and
/// including that page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    bounds: Vec<(u32, usize)>,
}

impl PageLayout {
    pub fn new(pages: impl IntoIterator<Item = (u32, usize)>) -> Self {
        let mut cumulative = 0;
        let bounds = pages
            .into_iter()
            .map(|(page_number, len)| {
                cumulative += len;
                (page_number, cumulative)
            })
            .collect();
        Self { bounds }
    }

    /// Page containing `offset`.
    ///
    /// Returns the first page whose cumulative length is at least `offset`,
    /// clamping offsets past the end to the last page, and `None` when the
    /// document has no pages.
    ///
    /// This mirrors an approximate, not exact, page-boundary mapping, since
    /// page boundaries are only known by text length, not by exact
    /// offset-to-page projection; this is an explicit, acceptable design
    /// approximation, not a defect.
    pub fn page_for_offset(&self, offset: usize) -> Option<u32> {
        self.bounds
            .iter()
            .find(|(_, cumulative)| *cumulative >= offset)
            .or_else(|| self.bounds.last())
            .map(|(page_number, _)| *page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_cumulative_lengths() {
        let layout = PageLayout::new(vec![(1, 100), (2, 50), (3, 10)]);
        assert_eq!(layout.page_for_offset(0), Some(1));
        assert_eq!(layout.page_for_offset(100), Some(1));
        assert_eq!(layout.page_for_offset(101), Some(2));
        assert_eq!(layout.page_for_offset(150), Some(2));
        assert_eq!(layout.page_for_offset(155), Some(3));
    }

    #[test]
    fn offsets_past_the_end_clamp_to_last_page() {
        let layout = PageLayout::new(vec![(1, 10), (2, 10)]);
        assert_eq!(layout.page_for_offset(10_000), Some(2));
    }

    #[test]
    fn no_pages_means_no_page_number() {
        assert_eq!(PageLayout::default().page_for_offset(3), None);
    }

    #[test]
    fn duplicate_page_numbers_are_rejected() {
        let doc = SourceDocument::new("dup", "abc").with_pages(vec![
            Page { page_number: 1, text: "a".into() },
            Page { page_number: 1, text: "bc".into() },
        ]);
        assert_eq!(
            doc.layout().unwrap_err(),
            ScanError::DuplicatePage { document: "dup".into(), page_number: 1 }
        );
    }

    #[test]
    fn from_pages_joins_text() {
        let doc = SourceDocument::from_pages("two", vec!["first", "second"]);
        assert_eq!(doc.full_text, "first\n\nsecond");
        assert_eq!(doc.pages[1].page_number, 2);
    }
}
