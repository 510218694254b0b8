//! Error types for the challenge lifecycle

use thiserror::Error;

use crate::history::HistoryError;

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("No bosses enabled")]
    NoEligibleBosses,

    #[error("no challenge is pending")]
    NoPendingChallenge,

    #[error("failed to record completed challenge")]
    History(#[from] HistoryError),
}
