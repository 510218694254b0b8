//! Challenge generation and the pending-challenge lifecycle

mod error;
mod generator;
mod session;

pub use error::ChallengeError;
pub use generator::ChallengeGenerator;
pub use session::{ChallengeSession, SessionState};
