//! Harness configuration.

use std::env;
use std::path::PathBuf;

use evidence_catalogs::CatalogSource;

/// Overrides the fixtures directory.
pub const FIXTURES_ENV: &str = "EVIDENCE_FIXTURES";
/// Reads catalogs from this directory instead of the built-ins.
pub const CATALOG_DIR_ENV: &str = "EVIDENCE_CATALOG_DIR";

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub fixtures_dir: PathBuf,
    pub expected_failures: PathBuf,
    pub catalogs: CatalogSource,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl HarnessConfig {
    /// The fixtures shipped with this crate, scanned with built-in catalogs.
    pub fn standard() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        Self {
            fixtures_dir: root.join("fixtures"),
            expected_failures: root.join("expected-failures.toml"),
            catalogs: CatalogSource::Builtin,
            log_filter: "info".into(),
        }
    }

    /// [`HarnessConfig::standard`] with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::standard();
        if let Some(dir) = env::var_os(FIXTURES_ENV) {
            config.fixtures_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os(CATALOG_DIR_ENV) {
            config.catalogs = CatalogSource::Directory(PathBuf::from(dir));
        }
        config
    }

    pub fn with_catalogs(mut self, catalogs: CatalogSource) -> Self {
        self.catalogs = catalogs;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::standard()
    }
}
