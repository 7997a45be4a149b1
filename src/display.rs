//! Plain-text rendering of evidence spans under their source text.
//!
//! ```text
//! The family is incapable of care
//!     ╰─────────────────╯family_involvement(Negative)
//! ```
//!
//! Columns are measured in display width, so wide characters stay aligned.
//! Newlines in the rendered text are shown as spaces.

use std::fmt::{self, Write};
use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::evidence::Evidence;
use crate::rule::Axis;

struct IncludedSpan {
    range: Range<usize>,
    label: String,
}

pub struct EvidenceDisplay<'a> {
    text: &'a str,
    spans: Vec<IncludedSpan>,
}

impl<'a> EvidenceDisplay<'a> {
    pub fn new(text: &'a str) -> Self {
        EvidenceDisplay {
            text,
            spans: Vec::new(),
        }
    }

    /// Add one evidence item. Items whose offsets fall outside the text are skipped.
    pub fn include(&mut self, evidence: &Evidence) -> &mut Self {
        let in_bounds = evidence.end <= self.text.len()
            && evidence.start <= evidence.end
            && self.text.is_char_boundary(evidence.start)
            && self.text.is_char_boundary(evidence.end);
        if in_bounds {
            let label = match evidence.axis {
                Some(Axis::A) => format!("{}(A, {:?})", evidence.category, evidence.polarity),
                Some(Axis::B) => format!("{}(B, {:?})", evidence.category, evidence.polarity),
                None => format!("{}({:?})", evidence.category, evidence.polarity),
            };
            self.spans.push(IncludedSpan {
                range: evidence.start..evidence.end,
                label,
            });
        }
        self
    }

    pub fn include_all<'e, I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = &'e Evidence>,
    {
        for item in items {
            self.include(item);
        }
        self
    }

    fn column(&self, offset: usize) -> usize {
        UnicodeWidthStr::width(self.text[..offset].replace('\n', " ").as_str())
    }
}

impl<'a> fmt::Display for EvidenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text.replace('\n', " "))?;

        for span in &self.spans {
            f.write_char('\n')?;

            let start = self.column(span.range.start);
            let end = self.column(span.range.end);
            for _ in 0..start {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;
            for _ in (start + 1)..end.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end - start > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&span.label)?;
        }

        Ok(())
    }
}
