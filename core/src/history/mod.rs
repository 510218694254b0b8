//! History ledger
//!
//! Completed challenges are stored oldest first. Presenting them newest first
//! is a view concern; positions are display values, while `seq` is the
//! identity of an entry.

mod backend;
mod error;
mod ledger;

pub use backend::{JsonFileLedger, LedgerBackend, LedgerSnapshot, MemoryLedger};
pub use error::HistoryError;
pub use ledger::{HistoryLedger, SharedLedger};
