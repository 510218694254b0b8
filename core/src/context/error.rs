//! Error types for context operations

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::challenge::ChallengeError;
use crate::enablement::PreferencesError;
use crate::history::HistoryError;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Any failure surfaced by a [`super::Tracker`] operation
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),

    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid challenge: {reason}")]
    InvalidChallenge { reason: &'static str },
}

impl TrackerError {
    /// The history error behind this failure, if any
    pub fn history(&self) -> Option<&HistoryError> {
        match self {
            Self::History(e) | Self::Challenge(ChallengeError::History(e)) => Some(e),
            _ => None,
        }
    }
}
