//! Fixture file loading.

use crate::{ScenarioFixture, SpecError};
use std::fs;
use std::path::Path;

pub fn load_fixture(path: &Path) -> Result<ScenarioFixture, SpecError> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    ScenarioFixture::parse(&path.display().to_string(), &content)
}

/// Load all fixtures below `dir` (glob: **/*.toml), named by their path
/// relative to `dir` and sorted by name.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, ScenarioFixture)>, SpecError> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ScenarioFixture)>,
) -> Result<(), SpecError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let load_error = |e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(load_error)? {
        let path = entry.map_err(load_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml") {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let fixture = load_fixture(&path)?;
            fixtures.push((name, fixture));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_single_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("guardianship")
            .join("incapable-family.toml");
        let fixture = load_fixture(&path).unwrap();
        assert_eq!(fixture.tool, "guardianship_risk");
        assert_eq!(fixture.title.as_deref(), Some("Incapable family"));
    }

    #[test]
    fn loads_nested_fixtures_with_relative_names() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 8);
        assert!(fixtures.iter().any(|(name, _)| name == "guardianship/incapable-family.toml"));
        let names: Vec<_> = fixtures.iter().map(|(name, _)| name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn other_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut notes = fs::File::create(dir.path().join("README.md")).unwrap();
        writeln!(notes, "not a fixture").unwrap();
        fs::write(
            dir.path().join("one.toml"),
            "tool = \"bias\"\ntext = \"those people\"\n",
        )
        .unwrap();

        let fixtures = load_all_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].0, "one.toml");
    }

    #[test]
    fn fixtures_need_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "tool = \"bias\"\n").unwrap();
        assert!(matches!(load_fixture(&path), Err(SpecError::Parse { .. })));
    }
}
