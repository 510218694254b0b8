//! Boss catalog
//!
//! The catalog is the canonical roster of bosses known to the tracker. Its
//! `enabled` flags are informational; see [`crate::enablement`] for how
//! eligibility is actually decided.

mod builtin;
mod error;
mod loader;

pub use builtin::{BUILTIN_BOSSES, BuiltinCatalog};
pub use error::CatalogError;
pub use loader::{FileCatalog, parse_roster};

use bosskill_types::Boss;
use hashbrown::HashSet;

/// Source of the boss roster. Each call returns a fresh snapshot.
pub trait BossCatalog: Send + Sync {
    fn bosses(&self) -> Result<Vec<Boss>, CatalogError>;
}

/// Catalog over a fixed in-memory list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    bosses: Vec<Boss>,
}

impl StaticCatalog {
    pub fn new(bosses: Vec<Boss>) -> Self {
        Self { bosses }
    }

    /// Catalog of range-less bosses, all enabled by default.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Boss::new).collect())
    }
}

impl BossCatalog for StaticCatalog {
    fn bosses(&self) -> Result<Vec<Boss>, CatalogError> {
        Ok(self.bosses.clone())
    }
}

/// Check a roster is usable: non-empty, unique non-empty names, and either no
/// kill range or a complete valid one.
pub fn validate_roster(bosses: &[Boss]) -> Result<(), CatalogError> {
    if bosses.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(bosses.len());
    for boss in bosses {
        if boss.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !seen.insert(boss.name.as_str()) {
            return Err(CatalogError::DuplicateBoss {
                name: boss.name.clone(),
            });
        }
        let has_bounds = boss.min_kills.is_some() || boss.max_kills.is_some();
        if has_bounds && boss.kill_range().is_none() {
            return Err(CatalogError::InvalidRange {
                name: boss.name.clone(),
                min: boss.min_kills,
                max: boss.max_kills,
            });
        }
    }
    Ok(())
}
