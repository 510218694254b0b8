//! Enablement store
//!
//! Decides which catalog bosses are eligible for challenge generation. The
//! client-local override map is the only authority: an explicit override wins,
//! and a boss without one is enabled.

mod error;
mod preferences;

pub use error::PreferencesError;
pub use preferences::{EnablementOverrides, is_enabled};
