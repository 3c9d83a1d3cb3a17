//! Timesheet domain service implementing the query and command ports.
//!
//! The repository re-derives a week's status atomically with every entry
//! write. Mutations are additionally serialised by one async mutex so the
//! validation reads (week bounds, existing entry) see the state they write
//! against within this process.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ports::{
    RemovedEntry, TimesheetCommand, TimesheetQuery, TimesheetRepository, TimesheetRepositoryError,
};
use crate::domain::{
    EntryDraft, EntryId, EntryPatch, Error, TimesheetEntry, TimesheetWeek, WeekDetail, WeekFilter,
    WeekId,
};

/// Timesheet service backed by a [`TimesheetRepository`].
pub struct TimesheetService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    mutations: Mutex<()>,
}

impl<R> TimesheetService<R> {
    /// Create a service over `repo`, judging date buckets with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            mutations: Mutex::new(()),
        }
    }
}

impl<R> TimesheetService<R>
where
    R: TimesheetRepository,
{
    fn map_repository_error(error: TimesheetRepositoryError) -> Error {
        match error {
            TimesheetRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("timesheet store unavailable: {message}"))
            }
            TimesheetRepositoryError::Query { message } => {
                Error::internal(format!("timesheet store error: {message}"))
            }
        }
    }

    fn week_not_found(id: &WeekId) -> Error {
        Error::not_found(format!("week {id} not found"))
            .with_details(serde_json::json!({ "weekId": id.as_ref() }))
    }

    fn entry_not_found(id: &EntryId) -> Error {
        Error::not_found(format!("entry {id} not found"))
            .with_details(serde_json::json!({ "entryId": id.to_string() }))
    }

    async fn require_week(&self, id: &WeekId) -> Result<TimesheetWeek, Error> {
        self.repo
            .find_week(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::week_not_found(id))
    }

    async fn require_entry(&self, id: &EntryId) -> Result<TimesheetEntry, Error> {
        self.repo
            .find_entry(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::entry_not_found(id))
    }

    /// Re-derive the status of every week.
    ///
    /// Run once after seeding so stored statuses never disagree with entries.
    pub async fn reconcile_statuses(&self) -> Result<usize, Error> {
        let _guard = self.mutations.lock().await;
        let weeks = self
            .repo
            .list_weeks()
            .await
            .map_err(Self::map_repository_error)?;
        let mut changed = 0_usize;
        for week in &weeks {
            let status = self
                .repo
                .refresh_week_status(week.id())
                .await
                .map_err(Self::map_repository_error)?
                .ok_or_else(|| Self::week_not_found(week.id()))?;
            if status != week.status() {
                debug!(
                    week_id = %week.id(),
                    from = %week.status(),
                    to = %status,
                    "week status corrected"
                );
                changed = changed.saturating_add(1);
            }
        }
        info!(weeks = weeks.len(), changed, "week statuses reconciled");
        Ok(changed)
    }
}

#[async_trait]
impl<R> TimesheetQuery for TimesheetService<R>
where
    R: TimesheetRepository,
{
    async fn list_weeks(&self, filter: &WeekFilter) -> Result<Vec<TimesheetWeek>, Error> {
        let today = self.clock.utc().date_naive();
        let weeks = self
            .repo
            .list_weeks()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(weeks
            .into_iter()
            .filter(|week| filter.matches(week, today))
            .collect())
    }

    async fn get_week(&self, id: &WeekId) -> Result<WeekDetail, Error> {
        let week = self.require_week(id).await?;
        let entries = self
            .repo
            .list_entries(id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(WeekDetail::new(week, entries))
    }
}

#[async_trait]
impl<R> TimesheetCommand for TimesheetService<R>
where
    R: TimesheetRepository,
{
    async fn create_entry(
        &self,
        week_id: &WeekId,
        draft: EntryDraft,
    ) -> Result<TimesheetEntry, Error> {
        let _guard = self.mutations.lock().await;
        let week = self.require_week(week_id).await?;
        week.ensure_contains(draft.date)?;

        let entry = TimesheetEntry::from_draft(EntryId::random(), week_id.clone(), draft);
        let status = self
            .repo
            .insert_entry(&entry)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::week_not_found(week_id))?;

        info!(
            week_id = %week_id,
            entry_id = %entry.id(),
            hours = %entry.hours(),
            status = %status,
            "timesheet entry created"
        );
        Ok(entry)
    }

    async fn update_entry(&self, id: &EntryId, patch: EntryPatch) -> Result<TimesheetEntry, Error> {
        let _guard = self.mutations.lock().await;
        let existing = self.require_entry(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let week = self.require_week(existing.week_id()).await?;
        let updated = existing.patched(patch);
        week.ensure_contains(updated.date())?;

        let status = self
            .repo
            .update_entry(&updated)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::entry_not_found(id))?;

        info!(
            week_id = %updated.week_id(),
            entry_id = %id,
            status = %status,
            "timesheet entry updated"
        );
        Ok(updated)
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<(), Error> {
        let _guard = self.mutations.lock().await;
        let RemovedEntry { entry, status } = self
            .repo
            .delete_entry(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::entry_not_found(id))?;

        info!(
            week_id = %entry.week_id(),
            entry_id = %id,
            status = %status,
            "timesheet entry deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "timesheet_service_tests.rs"]
mod tests;
