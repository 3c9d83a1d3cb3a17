//! Process-memory adapters.
//!
//! [`InMemoryStore`] holds users, weeks and entries behind one `RwLock` and
//! implements the timesheet, user and demo-data ports. Access tokens live in
//! [`InMemoryAccessTokenRepository`]. Data is lost when the process exits.

mod access_tokens;
mod store;

pub use access_tokens::InMemoryAccessTokenRepository;
pub use store::InMemoryStore;

use std::time::Duration;

/// Optional artificial delay applied before every repository call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    /// No delay.
    pub const NONE: Self = Self(Duration::ZERO);

    /// Delay every call by `millis` milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Configured delay.
    pub const fn duration(self) -> Duration {
        self.0
    }

    pub(crate) async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

const POISONED: &str = "in-memory store lock poisoned";
