//! Driven port for timesheet week and entry storage.
//!
//! Validation lives in the domain service that drives this port. Every entry
//! write re-derives the owning week's status with
//! [`derive_status`](crate::domain::derive_status) inside the same atomic unit
//! as the write, so a stored status never disagrees with the stored entries.

use async_trait::async_trait;

use crate::domain::{EntryId, TimesheetEntry, TimesheetStatus, TimesheetWeek, WeekId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by timesheet storage adapters.
    pub enum TimesheetRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "timesheet repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "timesheet repository query failed: {message}",
    }
}

/// Storage for weeks and their entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimesheetRepository: Send + Sync {
    /// Every week in store order.
    async fn list_weeks(&self) -> Result<Vec<TimesheetWeek>, TimesheetRepositoryError>;

    /// Fetch one week.
    async fn find_week(&self, id: &WeekId)
    -> Result<Option<TimesheetWeek>, TimesheetRepositoryError>;

    /// Re-derive and persist the status of one week from its entries.
    /// Returns `None` when the week is unknown.
    async fn refresh_week_status(
        &self,
        id: &WeekId,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError>;

    /// Entries of one week in insertion order.
    async fn list_entries(
        &self,
        week_id: &WeekId,
    ) -> Result<Vec<TimesheetEntry>, TimesheetRepositoryError>;

    /// Fetch one entry.
    async fn find_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<TimesheetEntry>, TimesheetRepositoryError>;

    /// Append a new entry and return the week's new status. Returns `None`
    /// when the owning week is unknown; nothing is written then.
    async fn insert_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError>;

    /// Replace a stored entry and return the week's new status. Returns
    /// `None` when the entry is unknown.
    async fn update_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError>;

    /// Remove an entry, returning it with the week's new status when it
    /// existed.
    async fn delete_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<RemovedEntry>, TimesheetRepositoryError>;
}

/// An entry taken out of the store and the status its week was left with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    /// The entry as it was stored.
    pub entry: TimesheetEntry,
    /// Status of the owning week after the removal.
    pub status: TimesheetStatus,
}
