//! Custom roster loading
//!
//! A roster file is TOML with one `[[boss]]` table per boss:
//!
//! ```toml
//! [[boss]]
//! name = "Zulrah"
//! min_kills = 20
//! max_kills = 50
//!
//! [[boss]]
//! name = "Scurrius"   # no range: the configured default applies
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bosskill_types::Boss;
use serde::Deserialize;

use super::{BossCatalog, CatalogError, validate_roster};

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default, rename = "boss")]
    bosses: Vec<Boss>,
}

/// Parse and validate a roster from TOML text.
pub fn parse_roster(content: &str, path: &Path) -> Result<Vec<Boss>, CatalogError> {
    let file: RosterFile = toml::from_str(content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_roster(&file.bosses)?;
    Ok(file.bosses)
}

/// Catalog read from a TOML file on every fetch, so edits to the file are
/// picked up without restarting.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BossCatalog for FileCatalog {
    fn bosses(&self) -> Result<Vec<Boss>, CatalogError> {
        let content = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let bosses = parse_roster(&content, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = bosses.len(), "Loaded boss catalog");
        Ok(bosses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosskill_types::KillRange;

    fn parse(content: &str) -> Result<Vec<Boss>, CatalogError> {
        parse_roster(content, Path::new("roster.toml"))
    }

    #[test]
    fn parses_bosses_with_and_without_ranges() {
        let bosses = parse(
            r#"
            [[boss]]
            name = "Zulrah"
            min_kills = 20
            max_kills = 50

            [[boss]]
            name = "Scurrius"
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(bosses.len(), 2);
        assert_eq!(bosses[0].kill_range(), KillRange::new(20, 50));
        assert!(bosses[1].kill_range().is_none());
        assert!(!bosses[1].enabled);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = parse(
            r#"
            [[boss]]
            name = "Zulrah"
            [[boss]]
            name = "Zulrah"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateBoss { name } if name == "Zulrah"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let bosses = parse(
            r#"
            [[boss]]
            name = "Zulrah"
            [[boss]]
            name = "zulrah"
            "#,
        )
        .unwrap();
        assert_eq!(bosses.len(), 2);
    }

    #[test]
    fn rejects_half_ranges() {
        let err = parse(
            r#"
            [[boss]]
            name = "Vorkath"
            min_kills = 5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRange { .. }));
    }

    #[test]
    fn empty_roster_is_an_error() {
        assert!(matches!(parse(""), Err(CatalogError::Empty)));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalog::new(dir.path().join("missing.toml"));
        let err = catalog.bosses().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn file_edits_are_visible_on_next_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        fs::write(&path, "[[boss]]\nname = \"Zulrah\"\n").unwrap();
        let catalog = FileCatalog::new(&path);
        assert_eq!(catalog.bosses().unwrap().len(), 1);

        fs::write(&path, "[[boss]]\nname = \"Zulrah\"\n[[boss]]\nname = \"Vorkath\"\n").unwrap();
        assert_eq!(catalog.bosses().unwrap().len(), 2);
    }
}
