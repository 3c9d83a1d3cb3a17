//! Port for loading the demo dataset into a store.
//!
//! Adapters apply the whole dataset atomically and only once; a store that
//! already holds weeks reports `AlreadySeeded` and is left untouched.

use async_trait::async_trait;

use crate::domain::DemoDataset;

use super::define_port_error;

define_port_error! {
    /// Errors raised while applying the demo dataset.
    pub enum DemoDataRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "demo data seeding connection failed: {message}",
        /// A write failed; nothing was applied.
        Query { message: String } => "demo data seeding query failed: {message}",
    }
}

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The dataset was written.
    Applied,
    /// The store already held data; nothing was written.
    AlreadySeeded,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoDataRepository: Send + Sync {
    /// Write users, weeks and entries unless the store is already populated.
    async fn seed_demo_data(
        &self,
        dataset: &DemoDataset,
    ) -> Result<SeedingResult, DemoDataRepositoryError>;
}
