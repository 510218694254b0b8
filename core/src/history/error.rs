//! Error types for the history ledger

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no history entry with sequence number {seq}")]
    UnknownEntry { seq: u64 },

    #[error("history entry at {index} changed (expected #{expected}, found #{found})")]
    StaleIndex {
        index: usize,
        expected: u64,
        found: u64,
    },

    #[error("history sequence numbers exhausted (next would exceed {last})")]
    SeqExhausted { last: u64 },

    #[error("failed to read history {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse history {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write history {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history")]
    Serialize(#[from] serde_json::Error),
}

impl HistoryError {
    /// Errors caused by the request rather than the backing store
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::UnknownEntry { .. } | Self::StaleIndex { .. }
        )
    }
}
