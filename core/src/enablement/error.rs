//! Error types for override persistence

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize overrides")]
    Serialize(#[from] toml::ser::Error),
}
