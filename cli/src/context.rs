use bosskill_core::context::{AppConfig, AppConfigExt, Tracker, TrackerError};
use bosskill_core::history::HistoryLedger;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Row of the last history listing: chronological index and sequence number,
/// in the newest-first order the user saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShownEntry {
    pub index: usize,
    pub seq: u64,
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the core tracker.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub tracker: Arc<RwLock<Tracker>>,
    /// What the last `history` command displayed, for index-based deletes
    pub last_listing: Arc<Mutex<Vec<ShownEntry>>>,
}

impl CliContext {
    pub fn new() -> Result<Self, TrackerError> {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Result<Self, TrackerError> {
        let tracker = build_tracker(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            tracker: Arc::new(RwLock::new(tracker)),
            last_listing: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Rebuild the tracker after a config change, keeping the pending challenge.
    /// The config is only replaced once the new tracker is ready.
    pub async fn apply_config(&self, config: AppConfig) -> Result<(), TrackerError> {
        let mut tracker = self.tracker.write().await;
        let session = tracker.session().clone();
        *tracker = build_tracker(&config)?.with_session(session);
        *self.config.write().await = config;
        self.last_listing.lock().await.clear();
        Ok(())
    }
}

fn build_tracker(config: &AppConfig) -> Result<Tracker, TrackerError> {
    let ledger = HistoryLedger::open(config.history_path()).into_shared();
    Tracker::from_config(config, ledger)
}
