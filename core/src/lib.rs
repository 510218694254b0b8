pub mod api;
pub mod catalog;
pub mod challenge;
pub mod context;
pub mod enablement;
pub mod history;

// Re-exports for convenience
pub use api::{ApiRequest, ApiResponse, Method, dispatch};
pub use bosskill_types::{
    AppConfig, Boss, Challenge, DEFAULT_KILL_RANGE, HistoryEntry, KillRange,
};
pub use catalog::{BossCatalog, BuiltinCatalog, CatalogError, FileCatalog, StaticCatalog};
pub use challenge::{ChallengeError, ChallengeGenerator, ChallengeSession, SessionState};
pub use context::{AppConfigExt, ConfigError, Tracker, TrackerError};
pub use enablement::{EnablementOverrides, PreferencesError, is_enabled};
pub use history::{HistoryError, HistoryLedger, JsonFileLedger, MemoryLedger, SharedLedger};
