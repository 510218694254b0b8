use std::path::PathBuf;

use bosskill_types::{AppConfig, Boss, Challenge, HistoryEntry};
use chrono::NaiveDateTime;

use super::{AppConfigExt, TrackerError};
use crate::catalog::BossCatalog;
use crate::challenge::{ChallengeGenerator, ChallengeSession};
use crate::enablement::EnablementOverrides;
use crate::history::SharedLedger;

/// One client's view of the challenge tracker.
///
/// The tracker owns:
/// - The boss catalog and the client-local enablement overrides
/// - The challenge session (at most one pending challenge)
/// - A handle to the history ledger, which may be shared with other trackers
///
/// Overrides are written through to `overrides_path` on every change. A failed
/// write leaves the in-memory overrides untouched.
pub struct Tracker {
    catalog: Box<dyn BossCatalog>,
    overrides: EnablementOverrides,
    overrides_path: Option<PathBuf>,
    session: ChallengeSession,
    generator: ChallengeGenerator,
    ledger: SharedLedger,
    history_limit: usize,
}

impl Tracker {
    /// Tracker with no persisted overrides and an entropy-seeded generator
    pub fn new(catalog: Box<dyn BossCatalog>, ledger: SharedLedger) -> Self {
        Self {
            catalog,
            overrides: EnablementOverrides::new(),
            overrides_path: None,
            session: ChallengeSession::new(),
            generator: ChallengeGenerator::from_entropy(),
            ledger,
            history_limit: super::DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Build a tracker from stored settings, loading overrides from disk.
    pub fn from_config(config: &AppConfig, ledger: SharedLedger) -> Result<Self, TrackerError> {
        let overrides_path = config.overrides_path();
        let overrides = EnablementOverrides::load(&overrides_path)?;
        tracing::debug!(
            path = %overrides_path.display(),
            count = overrides.bosses.len(),
            "Loaded enablement overrides"
        );

        let generator =
            ChallengeGenerator::from_entropy().with_default_range(config.default_kill_range());

        Ok(Self::new(config.catalog(), ledger)
            .with_overrides(overrides, Some(overrides_path))
            .with_generator(generator)
            .with_history_limit(config.history_limit))
    }

    pub fn with_overrides(mut self, overrides: EnablementOverrides, path: Option<PathBuf>) -> Self {
        self.overrides = overrides;
        self.overrides_path = path;
        self
    }

    pub fn with_generator(mut self, generator: ChallengeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Carry a session over, e.g. when rebuilding after a config change
    pub fn with_session(mut self, session: ChallengeSession) -> Self {
        self.session = session;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn session(&self) -> &ChallengeSession {
        &self.session
    }

    pub fn overrides(&self) -> &EnablementOverrides {
        &self.overrides
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn pending(&self) -> Option<&Challenge> {
        self.session.pending()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bosses & Enablement
    // ─────────────────────────────────────────────────────────────────────────

    /// Catalog roster with `enabled` replaced by the effective state
    pub fn bosses(&self) -> Result<Vec<Boss>, TrackerError> {
        let mut bosses = self.catalog.bosses()?;
        for boss in &mut bosses {
            boss.enabled = self.overrides.is_enabled(boss);
        }
        Ok(bosses)
    }

    /// Bosses currently eligible for generation, in catalog order
    pub fn eligible(&self) -> Result<Vec<Boss>, TrackerError> {
        Ok(self.overrides.eligible(&self.catalog.bosses()?))
    }

    pub fn set_override(&mut self, name: &str, enabled: bool) -> Result<(), TrackerError> {
        self.update_overrides(|overrides| overrides.set_override(name, enabled))?;
        self.warn_if_unknown(name);
        tracing::info!(boss = %name, enabled, "Boss enablement set");
        Ok(())
    }

    /// Flip a boss's effective state and return the new state
    pub fn toggle(&mut self, name: &str) -> Result<bool, TrackerError> {
        let enabled = self.update_overrides(|overrides| overrides.toggle(name))?;
        self.warn_if_unknown(name);
        tracing::info!(boss = %name, enabled, "Boss enablement toggled");
        Ok(enabled)
    }

    /// Drop every override, making all bosses eligible again
    pub fn clear_overrides(&mut self) -> Result<(), TrackerError> {
        self.update_overrides(EnablementOverrides::clear_all)?;
        tracing::info!("Cleared all enablement overrides");
        Ok(())
    }

    fn update_overrides<T>(
        &mut self,
        change: impl FnOnce(&mut EnablementOverrides) -> T,
    ) -> Result<T, TrackerError> {
        let mut updated = self.overrides.clone();
        let result = change(&mut updated);
        if let Some(path) = &self.overrides_path {
            updated.save(path)?;
        }
        self.overrides = updated;
        Ok(result)
    }

    fn warn_if_unknown(&self, name: &str) {
        let known = self
            .catalog
            .bosses()
            .map(|bosses| bosses.iter().any(|b| b.name == name))
            .unwrap_or(true);
        if !known {
            tracing::warn!(boss = %name, "Override recorded for a boss the catalog does not list");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Challenge Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate a new pending challenge, replacing any current one
    pub fn generate(&mut self) -> Result<Challenge, TrackerError> {
        let eligible = self.eligible()?;
        let challenge = self.session.generate(&mut self.generator, &eligible)?;
        tracing::info!(
            boss = %challenge.boss,
            kills = challenge.kills,
            eligible = eligible.len(),
            "Challenge generated"
        );
        Ok(challenge)
    }

    /// Complete the pending challenge, recording it with the current time
    pub async fn complete(&mut self) -> Result<HistoryEntry, TrackerError> {
        self.complete_at(now()).await
    }

    pub async fn complete_at(
        &mut self,
        completed: NaiveDateTime,
    ) -> Result<HistoryEntry, TrackerError> {
        let mut ledger = self.ledger.lock().await;
        Ok(self.session.complete(&mut ledger, completed)?)
    }

    /// Record a completion reported by a client rather than taken from the
    /// session. If it matches the pending challenge, the session goes Idle.
    pub async fn record(&mut self, challenge: Challenge) -> Result<HistoryEntry, TrackerError> {
        if challenge.boss.is_empty() {
            return Err(TrackerError::InvalidChallenge {
                reason: "boss name is empty",
            });
        }
        if challenge.kills == 0 {
            return Err(TrackerError::InvalidChallenge {
                reason: "kill count must be positive",
            });
        }

        let entry = self
            .ledger
            .lock()
            .await
            .append(HistoryEntry::from_challenge(&challenge, now()))?;
        self.session.settle(&entry);
        Ok(entry)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────

    /// Full history, oldest first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, TrackerError> {
        Ok(self.ledger.lock().await.list()?)
    }

    /// The last `history_limit` entries, oldest first
    pub async fn recent_history(&self) -> Result<Vec<HistoryEntry>, TrackerError> {
        Ok(self.ledger.lock().await.recent(self.history_limit)?)
    }

    pub async fn delete_at(&self, index: usize) -> Result<HistoryEntry, TrackerError> {
        Ok(self.ledger.lock().await.delete_at(index)?)
    }

    /// Delete by position in the `recent_history` list
    pub async fn delete_recent_at(&self, index: usize) -> Result<HistoryEntry, TrackerError> {
        Ok(self
            .ledger
            .lock()
            .await
            .delete_recent_at(self.history_limit, index)?)
    }

    pub async fn delete_at_checked(
        &self,
        index: usize,
        expected_seq: u64,
    ) -> Result<HistoryEntry, TrackerError> {
        Ok(self
            .ledger
            .lock()
            .await
            .delete_at_checked(index, expected_seq)?)
    }

    pub async fn delete_entry(&self, seq: u64) -> Result<HistoryEntry, TrackerError> {
        Ok(self.ledger.lock().await.remove(seq)?)
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
