//! Application configuration
//!
//! This module re-exports the shared `AppConfig` from bosskill-types and adds
//! platform defaults, persistence, and the paths derived from it.

use std::path::PathBuf;

pub use bosskill_types::{AppConfig, DEFAULT_HISTORY_LIMIT};

use super::ConfigError;
use crate::catalog::{BossCatalog, BuiltinCatalog, FileCatalog};

const APP_NAME: &str = "bosskill";
const CONFIG_NAME: &str = "config";

pub const HISTORY_FILE: &str = "history.json";
pub const OVERRIDES_FILE: &str = "overrides.toml";

/// `~/.local/share/bosskill` on Linux, `%LOCALAPPDATA%\bosskill` on Windows
fn default_data_directory() -> String {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .to_str()
        .map(String::from)
        .unwrap_or_default()
}

/// Extension trait for AppConfig persistence and derived paths
pub trait AppConfigExt: Sized {
    fn try_load() -> Result<Self, ConfigError>;
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn data_dir(&self) -> PathBuf;
    fn history_path(&self) -> PathBuf;
    fn overrides_path(&self) -> PathBuf;
    fn catalog(&self) -> Box<dyn BossCatalog>;
}

impl AppConfigExt for AppConfig {
    fn try_load() -> Result<Self, ConfigError> {
        let mut config: AppConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        if config.data_directory.is_empty() {
            config.data_directory = default_data_directory();
        }
        Ok(config)
    }

    /// Load the stored config, falling back to defaults if it can't be read
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Self::load_with_defaults()
        })
    }

    /// Defaults with the platform data directory filled in
    fn load_with_defaults() -> Self {
        AppConfig::with_data_directory(default_data_directory())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn data_dir(&self) -> PathBuf {
        if self.data_directory.is_empty() {
            PathBuf::from(default_data_directory())
        } else {
            PathBuf::from(&self.data_directory)
        }
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir().join(HISTORY_FILE)
    }

    fn overrides_path(&self) -> PathBuf {
        self.data_dir().join(OVERRIDES_FILE)
    }

    /// Catalog named by `catalog_file`, or the built-in roster
    fn catalog(&self) -> Box<dyn BossCatalog> {
        match &self.catalog_file {
            Some(path) if !path.is_empty() => Box::new(FileCatalog::new(path)),
            _ => Box::new(BuiltinCatalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_data_directory() {
        let config = AppConfig::with_data_directory("/srv/bosskill".to_string());
        assert_eq!(config.history_path(), PathBuf::from("/srv/bosskill/history.json"));
        assert_eq!(config.overrides_path(), PathBuf::from("/srv/bosskill/overrides.toml"));
    }

    #[test]
    fn empty_data_directory_uses_platform_default() {
        let config = AppConfig::default();
        assert!(config.data_dir().ends_with(APP_NAME));
    }

    #[test]
    fn builtin_catalog_when_no_file_configured() {
        let config = AppConfig::with_data_directory("/tmp/x".to_string());
        let bosses = config.catalog().bosses().unwrap();
        assert!(bosses.iter().any(|b| b.name == "Zulrah"));
    }
}
