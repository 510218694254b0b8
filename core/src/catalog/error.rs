//! Error types for catalog loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or validating a boss roster
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("catalog lists no bosses")]
    Empty,

    #[error("catalog contains a boss with an empty name")]
    EmptyName,

    #[error("boss '{name}' is listed more than once")]
    DuplicateBoss { name: String },

    #[error("boss '{name}' has an invalid kill range ({min:?}..={max:?})")]
    InvalidRange {
        name: String,
        min: Option<u32>,
        max: Option<u32>,
    },
}
