//! Boss enablement overrides - user-specific eligibility switches
//!
//! Overrides are stored separately from the catalog so users can:
//! - Toggle bosses on/off without editing the roster
//! - Keep their choices when the roster changes (unknown names are retained)

use std::collections::BTreeMap;
use std::path::Path;

use bosskill_types::Boss;
use serde::{Deserialize, Serialize};

use super::PreferencesError;

/// Effective enablement of a boss.
///
/// An explicit override wins; without one the boss is enabled. The catalog's
/// own `enabled` flag is deliberately ignored.
pub fn is_enabled(boss: &Boss, overrides: &EnablementOverrides) -> bool {
    overrides.get(&boss.name).unwrap_or(true)
}

/// Override map keyed by exact (case-sensitive) boss name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablementOverrides {
    #[serde(default)]
    pub bosses: BTreeMap<String, bool>,
}

impl EnablementOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a TOML file. A missing file yields no overrides.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save overrides to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PreferencesError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        std::fs::write(path, content).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit override for a boss, if any
    pub fn get(&self, name: &str) -> Option<bool> {
        self.bosses.get(name).copied()
    }

    pub fn is_enabled(&self, boss: &Boss) -> bool {
        is_enabled(boss, self)
    }

    /// Record an override. Names the catalog doesn't know are accepted.
    pub fn set_override(&mut self, name: &str, enabled: bool) {
        self.bosses.insert(name.to_string(), enabled);
    }

    /// Flip the effective state of a boss and return the new state
    pub fn toggle(&mut self, name: &str) -> bool {
        let enabled = !self.get(name).unwrap_or(true);
        self.set_override(name, enabled);
        enabled
    }

    /// Remove the override for a boss (back to enabled)
    pub fn clear(&mut self, name: &str) -> bool {
        self.bosses.remove(name).is_some()
    }

    pub fn clear_all(&mut self) {
        self.bosses.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }

    /// Bosses from `roster` that are currently enabled, in roster order
    pub fn eligible(&self, roster: &[Boss]) -> Vec<Boss> {
        roster
            .iter()
            .filter(|boss| self.is_enabled(boss))
            .cloned()
            .collect()
    }

    /// Override keys that the given roster does not list
    pub fn unknown_names<'a>(&'a self, roster: &[Boss]) -> Vec<&'a str> {
        self.bosses
            .keys()
            .filter(|name| !roster.iter().any(|b| &b.name == *name))
            .map(String::as_str)
            .collect()
    }
}
