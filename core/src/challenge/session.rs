//! Challenge session state machine
//!
//! A session is either Idle or holds exactly one pending challenge:
//!
//! ```text
//!   Idle --generate--> Pending --complete--> Idle
//!                      Pending --generate--> Pending (replaced, not persisted)
//! ```

use bosskill_types::{Boss, Challenge, HistoryEntry};
use chrono::NaiveDateTime;
use rand::Rng;

use super::{ChallengeError, ChallengeGenerator};
use crate::history::HistoryLedger;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Pending(Challenge),
}

/// Per-client holder of the current challenge
#[derive(Debug, Clone, Default)]
pub struct ChallengeSession {
    state: SessionState,
}

impl ChallengeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&Challenge> {
        match &self.state {
            SessionState::Pending(challenge) => Some(challenge),
            SessionState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Generate a challenge and make it the pending one, replacing any
    /// challenge already pending. On failure the state is untouched.
    pub fn generate<R: Rng>(
        &mut self,
        generator: &mut ChallengeGenerator<R>,
        eligible: &[Boss],
    ) -> Result<Challenge, ChallengeError> {
        let challenge = generator.generate(eligible)?;
        if let Some(previous) = self.pending() {
            tracing::debug!(boss = %previous.boss, kills = previous.kills, "Discarding pending challenge");
        }
        self.state = SessionState::Pending(challenge.clone());
        Ok(challenge)
    }

    /// Record the pending challenge in `ledger` and return to Idle.
    ///
    /// The session stays Pending if the ledger write fails, so the user can
    /// retry without losing the challenge.
    pub fn complete(
        &mut self,
        ledger: &mut HistoryLedger,
        completed: NaiveDateTime,
    ) -> Result<HistoryEntry, ChallengeError> {
        let challenge = self.pending().ok_or(ChallengeError::NoPendingChallenge)?;
        let entry = ledger.append(HistoryEntry::from_challenge(challenge, completed))?;
        self.state = SessionState::Idle;
        Ok(entry)
    }

    /// Drop the pending challenge if `entry` records it. Used when a
    /// completion arrives through another path (the `/api/complete` body).
    pub fn settle(&mut self, entry: &HistoryEntry) -> bool {
        let matches = self.pending().is_some_and(|c| entry.matches(c));
        if matches {
            self.state = SessionState::Idle;
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryError, LedgerBackend, LedgerSnapshot};

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .unwrap()
    }

    struct BrokenBackend;

    impl LedgerBackend for BrokenBackend {
        fn load(&self) -> Result<LedgerSnapshot, HistoryError> {
            Ok(LedgerSnapshot::default())
        }

        fn store(&mut self, _snapshot: &LedgerSnapshot) -> Result<(), HistoryError> {
            Err(HistoryError::Write {
                path: "broken".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn starts_idle() {
        let session = ChallengeSession::new();
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn generate_then_complete_appends_matching_entry() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        let mut ledger = HistoryLedger::in_memory();

        let challenge = session
            .generate(&mut generator, &[Boss::new("DragonA")])
            .unwrap();
        let entry = session.complete(&mut ledger, now()).unwrap();

        assert!(entry.matches(&challenge));
        assert_eq!(entry.completed, now());
        assert_eq!(ledger.list().unwrap(), vec![entry]);
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn generate_with_no_bosses_leaves_session_idle() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        assert!(matches!(
            session.generate(&mut generator, &[]),
            Err(ChallengeError::NoEligibleBosses)
        ));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn failed_generate_keeps_existing_pending_challenge() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        let first = session
            .generate(&mut generator, &[Boss::new("DragonA")])
            .unwrap();
        assert!(session.generate(&mut generator, &[]).is_err());
        assert_eq!(session.pending(), Some(&first));
    }

    #[test]
    fn regenerate_replaces_without_persisting() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        let mut ledger = HistoryLedger::in_memory();

        session.generate(&mut generator, &[Boss::new("DragonA")]).unwrap();
        let second = session
            .generate(&mut generator, &[Boss::new("DragonB")])
            .unwrap();
        assert_eq!(second.boss, "DragonB");

        session.complete(&mut ledger, now()).unwrap();
        let history = ledger.list().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].boss, "DragonB");
    }

    #[test]
    fn complete_while_idle_writes_nothing() {
        let mut session = ChallengeSession::new();
        let mut ledger = HistoryLedger::in_memory();
        assert!(matches!(
            session.complete(&mut ledger, now()),
            Err(ChallengeError::NoPendingChallenge)
        ));
        assert!(ledger.list().unwrap().is_empty());
    }

    #[test]
    fn failed_append_keeps_challenge_pending() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        let mut ledger = HistoryLedger::new(BrokenBackend);

        let challenge = session
            .generate(&mut generator, &[Boss::new("DragonA")])
            .unwrap();
        assert!(matches!(
            session.complete(&mut ledger, now()),
            Err(ChallengeError::History(HistoryError::Write { .. }))
        ));
        assert_eq!(session.pending(), Some(&challenge));
    }

    #[test]
    fn settle_only_clears_matching_challenge() {
        let mut session = ChallengeSession::new();
        let mut generator = ChallengeGenerator::seeded(9);
        let challenge = session
            .generate(&mut generator, &[Boss::new("DragonA")])
            .unwrap();

        let other = HistoryEntry::from_challenge(
            &Challenge {
                boss: "DragonB".into(),
                kills: challenge.kills,
            },
            now(),
        );
        assert!(!session.settle(&other));
        assert!(session.is_pending());

        assert!(session.settle(&HistoryEntry::from_challenge(&challenge, now())));
        assert!(!session.is_pending());
    }
}
