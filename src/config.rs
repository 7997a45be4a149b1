//! Per-scan configuration.
//!
//! Catalog values apply unless a [`ScanConfig`] overrides them.

/// Overrides applied on top of a catalog's evidence policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanConfig {
    /// Grapheme clusters kept either side of a match.
    pub context_window: Option<usize>,
    /// Bound on supporting evidence per category.
    pub max_supporting: Option<usize>,
    /// Scan batch documents on scoped threads.
    pub parallel: bool,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = Some(window);
        self
    }

    /// Values below one are raised to one.
    pub fn with_max_supporting(mut self, max: usize) -> Self {
        self.max_supporting = Some(max.max(1));
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
