//! Error types for catalog compilation and scanning.
//!
//! [`ConfigurationError`] is fatal: a catalog that fails to compile must not
//! be used at all. [`ScanError`] is scoped to a single document and never
//! affects other documents in a batch.

use thiserror::Error;

/// Errors raised while loading or compiling an indicator catalog.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The catalog source is not valid RON for the catalog schema.
    #[error("catalog `{catalog}` could not be parsed: {message}")]
    Schema { catalog: String, message: String },

    /// An indicator pattern failed to compile.
    #[error("pattern `{pattern}` in category `{category}` failed to compile: {source}")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An indicator pattern matches the empty string, so it would match at
    /// every position of every document.
    #[error("pattern `{pattern}` in category `{category}` matches the empty string")]
    EmptyMatch { category: String, pattern: String },

    /// Two categories share a name.
    #[error("category `{category}` is declared more than once")]
    DuplicateCategory { category: String },

    /// A category declares no patterns at all.
    #[error("category `{category}` has no indicator patterns")]
    EmptyCategory { category: String },

    /// The catalog declares no categories.
    #[error("catalog `{catalog}` declares no categories")]
    NoCategories { catalog: String },

    /// Ladder rungs are not strictly descending.
    #[error("ladder rungs must be strictly descending (found {previous} before {next})")]
    LadderOrder { previous: f64, next: f64 },

    /// A numeric or structural setting is out of range.
    #[error("invalid setting `{setting}`: {message}")]
    InvalidSetting {
        setting: &'static str,
        message: String,
    },

    /// Axis tags are missing on a dual-axis catalog or present on a single-axis one.
    #[error("category `{category}`: {message}")]
    AxisMismatch { category: String, message: String },

    /// A catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors isolated to the scan of one document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The catalog's scoring shape does not match the requested scan.
    #[error("catalog `{tool}` cannot be used for a {requested} scan")]
    ShapeMismatch {
        tool: String,
        requested: &'static str,
    },

    /// The page list repeats a page number.
    #[error("page {page_number} appears more than once in document `{document}`")]
    DuplicatePage { document: String, page_number: u32 },
}

/// Result type for catalog operations.
pub type ConfigResult<T> = Result<T, ConfigurationError>;
