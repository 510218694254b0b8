//! Built-in boss roster
//!
//! Every entry carries its own kill range; these ranges are part of the
//! observable generation behaviour, so changing one changes what players see.

use bosskill_types::{Boss, KillRange};

use super::{BossCatalog, CatalogError};

/// (name, min kills, max kills)
pub static BUILTIN_BOSSES: &[(&str, u32, u32)] = &[
    // ─────────────────────────────────────────────────────────────────────────
    // Solo bosses
    // ─────────────────────────────────────────────────────────────────────────
    ("Zulrah", 20, 50),
    ("Corporeal Beast", 20, 50),
    ("Giant Mole", 20, 50),
    ("Kalphite Queen", 15, 30),
    ("King Black Dragon", 20, 50),
    ("Sarachnis", 20, 50),
    ("Phosani's Nightmare", 20, 50),
    // ─────────────────────────────────────────────────────────────────────────
    // Raids
    // ─────────────────────────────────────────────────────────────────────────
    ("Chambers of Xeric", 1, 3),
    ("Theatre of Blood", 1, 3),
    // ─────────────────────────────────────────────────────────────────────────
    // Desert Treasure II
    // ─────────────────────────────────────────────────────────────────────────
    ("Leviathan", 20, 50),
    ("Duke", 20, 50),
    ("Vardorvis", 20, 50),
    ("The Whisperer", 20, 50),
    // ─────────────────────────────────────────────────────────────────────────
    // Varlamore
    // ─────────────────────────────────────────────────────────────────────────
    ("Yama", 10, 20),
    ("Doom", 5, 10),
];

/// Catalog backed by [`BUILTIN_BOSSES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BossCatalog for BuiltinCatalog {
    fn bosses(&self) -> Result<Vec<Boss>, CatalogError> {
        BUILTIN_BOSSES
            .iter()
            .map(|&(name, min, max)| {
                KillRange::new(min, max)
                    .map(|range| Boss::with_range(name, range))
                    .ok_or_else(|| CatalogError::InvalidRange {
                        name: name.to_string(),
                        min: Some(min),
                        max: Some(max),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validate_roster;

    #[test]
    fn builtin_roster_is_valid() {
        let bosses = BuiltinCatalog.bosses().unwrap();
        assert_eq!(bosses.len(), BUILTIN_BOSSES.len());
        validate_roster(&bosses).unwrap();
    }

    #[test]
    fn raids_ask_for_few_kills() {
        let bosses = BuiltinCatalog.bosses().unwrap();
        let cox = bosses.iter().find(|b| b.name == "Chambers of Xeric").unwrap();
        assert_eq!(cox.kill_range(), KillRange::new(1, 3));
    }
}
