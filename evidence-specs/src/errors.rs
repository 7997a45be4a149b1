//! Error types for the scenario harness.

use evidence_scoring::{ConfigurationError, ScanError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture that is not valid TOML or is missing required fields.
    #[error("invalid fixture {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    #[error("fixture {fixture} names unknown tool `{tool}`")]
    UnknownTool { fixture: String, tool: String },

    #[error(transparent)]
    Catalog(#[from] ConfigurationError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

pub type SpecResult<T> = Result<T, SpecError>;
