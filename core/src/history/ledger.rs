//! Chronological ledger of completed challenges
//!
//! Every operation reloads from the backend, so the ledger never serves a
//! stale view of a file edited elsewhere. Mutations are read-modify-write and
//! must be serialized by the caller; share the ledger as a [`SharedLedger`].

use std::path::PathBuf;
use std::sync::Arc;

use bosskill_types::HistoryEntry;
use tokio::sync::Mutex;

use super::{HistoryError, JsonFileLedger, LedgerBackend, LedgerSnapshot, MemoryLedger};

/// Ledger handle shared between sessions. Holding the lock across a whole
/// operation is what prevents lost updates.
pub type SharedLedger = Arc<Mutex<HistoryLedger>>;

pub struct HistoryLedger {
    backend: Box<dyn LedgerBackend>,
}

impl HistoryLedger {
    pub fn new(backend: impl LedgerBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryLedger::new())
    }

    /// Ledger stored as JSON at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileLedger::new(path))
    }

    pub fn into_shared(self) -> SharedLedger {
        Arc::new(Mutex::new(self))
    }

    fn snapshot(&self) -> Result<LedgerSnapshot, HistoryError> {
        let mut snapshot = self.backend.load()?;
        let assigned = snapshot.assign_missing_seqs()?;
        if assigned > 0 {
            tracing::warn!(assigned, "Numbered history entries without sequence numbers");
        }
        Ok(snapshot)
    }

    /// All entries, oldest first. An empty ledger yields an empty list.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.snapshot()?.entries)
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.snapshot()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }

    /// The last `limit` entries, still oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.snapshot()?.entries;
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        Ok(entries)
    }

    /// Append `entry` at the end, assigning it the next sequence number.
    /// Any `seq` already on the entry is replaced.
    pub fn append(&mut self, mut entry: HistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.snapshot()?;
        entry.seq = snapshot.take_seq()?;
        snapshot.entries.push(entry.clone());
        self.backend.store(&snapshot)?;

        tracing::info!(seq = entry.seq, boss = %entry.boss, kills = entry.kills, "Recorded completed challenge");
        Ok(entry)
    }

    /// Remove the entry at chronological position `index`
    pub fn delete_at(&mut self, index: usize) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.snapshot()?;
        let len = snapshot.entries.len();
        if index >= len {
            return Err(HistoryError::IndexOutOfRange { index, len });
        }
        let removed = snapshot.entries.remove(index);
        self.backend.store(&snapshot)?;

        tracing::info!(index, seq = removed.seq, boss = %removed.boss, "Deleted history entry");
        Ok(removed)
    }

    /// Remove the entry at position `index` of the `recent(limit)` window, the
    /// list a client was last shown. Out-of-range is reported against the
    /// window length.
    pub fn delete_recent_at(
        &mut self,
        limit: usize,
        index: usize,
    ) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.snapshot()?;
        let offset = snapshot.entries.len().saturating_sub(limit);
        let shown = snapshot.entries.len() - offset;
        if index >= shown {
            return Err(HistoryError::IndexOutOfRange { index, len: shown });
        }
        let removed = snapshot.entries.remove(offset + index);
        self.backend.store(&snapshot)?;

        tracing::info!(index, offset, seq = removed.seq, boss = %removed.boss, "Deleted history entry");
        Ok(removed)
    }

    /// Positional delete that first checks the entry at `index` is still the
    /// one the caller saw (by sequence number).
    pub fn delete_at_checked(
        &mut self,
        index: usize,
        expected_seq: u64,
    ) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.snapshot()?;
        let len = snapshot.entries.len();
        let found = snapshot
            .entries
            .get(index)
            .map(|e| e.seq)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;
        if found != expected_seq {
            return Err(HistoryError::StaleIndex {
                index,
                expected: expected_seq,
                found,
            });
        }
        let removed = snapshot.entries.remove(index);
        self.backend.store(&snapshot)?;

        tracing::info!(index, seq = removed.seq, boss = %removed.boss, "Deleted history entry");
        Ok(removed)
    }

    /// Remove the entry with sequence number `seq`, wherever it now sits
    pub fn remove(&mut self, seq: u64) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.snapshot()?;
        let index = snapshot
            .entries
            .iter()
            .position(|e| e.seq == seq)
            .ok_or(HistoryError::UnknownEntry { seq })?;
        let removed = snapshot.entries.remove(index);
        self.backend.store(&snapshot)?;

        tracing::info!(index, seq, boss = %removed.boss, "Deleted history entry");
        Ok(removed)
    }
}
