//! Driving port for entry mutations. Each call leaves the affected week's
//! status consistent with its entries before returning.

use async_trait::async_trait;

use crate::domain::{EntryDraft, EntryId, EntryPatch, Error, TimesheetEntry, WeekId};

/// Write-side timesheet use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimesheetCommand: Send + Sync {
    /// Add an entry to `week_id`.
    async fn create_entry(&self, week_id: &WeekId, draft: EntryDraft)
    -> Result<TimesheetEntry, Error>;

    /// Merge `patch` into an existing entry.
    async fn update_entry(&self, id: &EntryId, patch: EntryPatch) -> Result<TimesheetEntry, Error>;

    /// Remove an entry.
    async fn delete_entry(&self, id: &EntryId) -> Result<(), Error>;
}
