//! Ledger storage backends
//!
//! The JSON file holds `{"next_seq": N, "entries": [...]}`. A bare array of
//! entries (the older log format, without sequence numbers) is also accepted
//! and is rewritten in the current shape on the next write.

use std::fs;
use std::path::{Path, PathBuf};

use bosskill_types::HistoryEntry;
use serde::{Deserialize, Serialize};

use super::HistoryError;

/// Everything a backend persists: entries in chronological order, plus the
/// sequence number the next append will receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub next_seq: u64,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

impl LedgerSnapshot {
    /// Give every unsequenced entry a fresh number in chronological order and
    /// make sure `next_seq` is above every number in use. Returns how many
    /// entries were numbered.
    pub fn assign_missing_seqs(&mut self) -> Result<usize, HistoryError> {
        let highest = self.entries.iter().map(|e| e.seq).max().unwrap_or(0);
        let mut next = self.next_seq.max(successor(highest)?).max(1);
        let mut assigned = 0;
        for entry in self.entries.iter_mut().filter(|e| e.seq == 0) {
            entry.seq = next;
            next = successor(next)?;
            assigned += 1;
        }
        self.next_seq = next;
        Ok(assigned)
    }

    /// Hand out `next_seq` and advance it
    pub fn take_seq(&mut self) -> Result<u64, HistoryError> {
        let seq = self.next_seq;
        self.next_seq = successor(seq)?;
        Ok(seq)
    }
}

fn successor(seq: u64) -> Result<u64, HistoryError> {
    seq.checked_add(1)
        .ok_or(HistoryError::SeqExhausted { last: seq })
}

pub trait LedgerBackend: Send {
    fn load(&self) -> Result<LedgerSnapshot, HistoryError>;
    fn store(&mut self, snapshot: &LedgerSnapshot) -> Result<(), HistoryError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON File
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum LedgerFile {
    Legacy(Vec<HistoryEntry>),
    Current(LedgerSnapshot),
}

#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerBackend for JsonFileLedger {
    fn load(&self) -> Result<LedgerSnapshot, HistoryError> {
        if !self.path.exists() {
            return Ok(LedgerSnapshot::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| HistoryError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(LedgerSnapshot::default());
        }

        let file: LedgerFile =
            serde_json::from_str(&content).map_err(|source| HistoryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(match file {
            LedgerFile::Legacy(entries) => LedgerSnapshot {
                next_seq: 0,
                entries,
            },
            LedgerFile::Current(snapshot) => snapshot,
        })
    }

    fn store(&mut self, snapshot: &LedgerSnapshot) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| HistoryError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content).map_err(|source| HistoryError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    snapshot: LedgerSnapshot,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            snapshot: LedgerSnapshot {
                next_seq: 0,
                entries,
            },
        }
    }
}

impl LedgerBackend for MemoryLedger {
    fn load(&self) -> Result<LedgerSnapshot, HistoryError> {
        Ok(self.snapshot.clone())
    }

    fn store(&mut self, snapshot: &LedgerSnapshot) -> Result<(), HistoryError> {
        self.snapshot = snapshot.clone();
        Ok(())
    }
}
