//! Shared data and configuration types for bosskill
//!
//! This crate contains the serializable types shared between the core library
//! and its front-ends. The JSON shapes match the `/api/*` wire contracts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Kill Ranges
// ─────────────────────────────────────────────────────────────────────────────

/// Lower bound of the fallback kill range for bosses without their own range.
pub const DEFAULT_MIN_KILLS: u32 = 1;

/// Upper bound (inclusive) of the fallback kill range.
pub const DEFAULT_MAX_KILLS: u32 = 10;

/// Inclusive range of kill counts a challenge may ask for.
///
/// Always satisfies `1 <= min <= max`; use [`KillRange::new`] to construct one
/// from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KillRange {
    min: u32,
    max: u32,
}

/// Fallback range used when a boss carries no range of its own.
pub const DEFAULT_KILL_RANGE: KillRange = KillRange {
    min: DEFAULT_MIN_KILLS,
    max: DEFAULT_MAX_KILLS,
};

impl KillRange {
    /// Returns `None` if `min` is zero or greater than `max`.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min >= 1 && min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, kills: u32) -> bool {
        (self.min..=self.max).contains(&kills)
    }
}

impl Default for KillRange {
    fn default() -> Self {
        DEFAULT_KILL_RANGE
    }
}

impl std::fmt::Display for KillRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bosses
// ─────────────────────────────────────────────────────────────────────────────

/// A boss as listed by a catalog.
///
/// `enabled` is the catalog's default and is informational only; effective
/// eligibility is decided by the enablement overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_kills: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_kills: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Boss {
    /// Boss with no kill range of its own.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            min_kills: None,
            max_kills: None,
        }
    }

    pub fn with_range(name: impl Into<String>, range: KillRange) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            min_kills: Some(range.min()),
            max_kills: Some(range.max()),
        }
    }

    /// The boss's own kill range, if both bounds are present and valid.
    pub fn kill_range(&self) -> Option<KillRange> {
        match (self.min_kills, self.max_kills) {
            (Some(min), Some(max)) => KillRange::new(min, max),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Challenges & History
// ─────────────────────────────────────────────────────────────────────────────

/// A generated (boss, kill count) pair awaiting completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub boss: String,
    pub kills: u32,
}

impl std::fmt::Display for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kill {} x {}", self.kills, self.boss)
    }
}

/// A completed challenge as stored in the history ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Stable sequence number assigned at append time. Zero means "not yet
    /// assigned" (log files written before sequence numbers existed).
    #[serde(default)]
    pub seq: u64,
    pub boss: String,
    pub kills: u32,
    /// Local completion time, ISO 8601 without offset
    pub completed: NaiveDateTime,
}

impl HistoryEntry {
    /// Build an unsequenced entry from a completed challenge.
    pub fn from_challenge(challenge: &Challenge, completed: NaiveDateTime) -> Self {
        Self {
            seq: 0,
            boss: challenge.boss.clone(),
            kills: challenge.kills,
            completed,
        }
    }

    pub fn matches(&self, challenge: &Challenge) -> bool {
        self.boss == challenge.boss && self.kills == challenge.kills
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRequest {
    #[serde(default)]
    pub boss: String,
    #[serde(default)]
    pub kills: u32,
}

/// Generic `{success: bool}` acknowledgement, with the new state for toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// `{error: string}` body returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Number of history entries returned by the recent-history view.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `history.json` and `overrides.toml`
    #[serde(default)]
    pub data_directory: String,
    /// Custom TOML boss roster; the built-in roster is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_min_kills")]
    pub default_min_kills: u32,
    #[serde(default = "default_max_kills")]
    pub default_max_kills: u32,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_min_kills() -> u32 {
    DEFAULT_MIN_KILLS
}

fn default_max_kills() -> u32 {
    DEFAULT_MAX_KILLS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_directory(String::new())
    }
}

impl AppConfig {
    pub fn with_data_directory(data_directory: String) -> Self {
        Self {
            data_directory,
            catalog_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_min_kills: DEFAULT_MIN_KILLS,
            default_max_kills: DEFAULT_MAX_KILLS,
        }
    }

    /// Fallback kill range, falling back further to the built-in default if
    /// the configured bounds are invalid.
    pub fn default_kill_range(&self) -> KillRange {
        KillRange::new(self.default_min_kills, self.default_max_kills).unwrap_or_default()
    }
}
