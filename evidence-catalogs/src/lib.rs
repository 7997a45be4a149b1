//! The indicator catalogs shipped with evidence-scoring.
//!
//! Each [`Tool`] is a RON catalog embedded at build time and compiled on
//! first use. Compiled catalogs are cached for the life of the process, so
//! every scan after the first reuses the same [`Catalog`].
//!
//! Catalogs can also be read from a directory with [`load_catalog`], which
//! lets deployments tune patterns without rebuilding.

use std::fmt;
use std::path::{Path, PathBuf};

use evidence_scoring::{Catalog, ConfigResult};
use once_cell::sync::OnceCell;

/// The analysis tools with a built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Bias,
    GuardianshipRisk,
    StateGuardianshipBias,
    ProfessionalLanguage,
    HumanRights,
    GoalsAlignment,
    FamilySupport,
    GuardianLimitations,
}

const ALL: [Tool; 8] = [
    Tool::Bias,
    Tool::GuardianshipRisk,
    Tool::StateGuardianshipBias,
    Tool::ProfessionalLanguage,
    Tool::HumanRights,
    Tool::GoalsAlignment,
    Tool::FamilySupport,
    Tool::GuardianLimitations,
];

static CACHE: [OnceCell<Catalog>; 8] = [
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
];

impl Tool {
    pub fn all() -> &'static [Tool] {
        &ALL
    }

    /// The tool's name as written in its catalog.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Bias => "bias",
            Tool::GuardianshipRisk => "guardianship_risk",
            Tool::StateGuardianshipBias => "state_guardianship_bias",
            Tool::ProfessionalLanguage => "professional_language",
            Tool::HumanRights => "human_rights",
            Tool::GoalsAlignment => "goals_alignment",
            Tool::FamilySupport => "family_support",
            Tool::GuardianLimitations => "guardian_limitations",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        ALL.iter().copied().find(|tool| tool.name() == name)
    }

    pub fn file_name(self) -> String {
        format!("{}.ron", self.name())
    }

    /// The embedded RON source.
    pub fn source(self) -> &'static str {
        match self {
            Tool::Bias => include_str!("../catalogs/bias.ron"),
            Tool::GuardianshipRisk => include_str!("../catalogs/guardianship_risk.ron"),
            Tool::StateGuardianshipBias => include_str!("../catalogs/state_guardianship_bias.ron"),
            Tool::ProfessionalLanguage => include_str!("../catalogs/professional_language.ron"),
            Tool::HumanRights => include_str!("../catalogs/human_rights.ron"),
            Tool::GoalsAlignment => include_str!("../catalogs/goals_alignment.ron"),
            Tool::FamilySupport => include_str!("../catalogs/family_support.ron"),
            Tool::GuardianLimitations => include_str!("../catalogs/guardian_limitations.ron"),
        }
    }

    /// Compiles the built-in catalog once and returns the cached copy.
    pub fn catalog(self) -> ConfigResult<&'static Catalog> {
        CACHE[self as usize].get_or_try_init(|| {
            tracing::debug!(tool = self.name(), "compiling built-in catalog");
            Catalog::from_ron(&self.file_name(), self.source())
        })
    }

    /// Whether the catalog scores two perspectives per category.
    pub fn is_dual_axis(self) -> bool {
        matches!(self, Tool::GoalsAlignment)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a catalog is read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    #[default]
    Builtin,
    /// A directory holding `<tool>.ron` files.
    Directory(PathBuf),
}

/// A compiled catalog, borrowed from the cache for built-ins.
#[derive(Debug)]
pub enum LoadedCatalog {
    Builtin(&'static Catalog),
    Owned(Catalog),
}

impl LoadedCatalog {
    pub fn get(&self) -> &Catalog {
        match self {
            LoadedCatalog::Builtin(catalog) => catalog,
            LoadedCatalog::Owned(catalog) => catalog,
        }
    }
}

impl std::ops::Deref for LoadedCatalog {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        self.get()
    }
}

pub fn load_catalog(tool: Tool, source: &CatalogSource) -> ConfigResult<LoadedCatalog> {
    match source {
        CatalogSource::Builtin => tool.catalog().map(LoadedCatalog::Builtin),
        CatalogSource::Directory(dir) => load_from_dir(tool, dir).map(LoadedCatalog::Owned),
    }
}

fn load_from_dir(tool: Tool, dir: &Path) -> ConfigResult<Catalog> {
    let path = dir.join(tool.file_name());
    tracing::debug!(tool = tool.name(), path = %path.display(), "loading catalog from disk");
    Catalog::from_path(&path)
}

#[cfg(test)]
mod tests;
