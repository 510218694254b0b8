mod config;
mod error;
mod tracker;

pub use config::{AppConfig, AppConfigExt, DEFAULT_HISTORY_LIMIT, HISTORY_FILE, OVERRIDES_FILE};
pub use error::{ConfigError, TrackerError};
pub use tracker::Tracker;
