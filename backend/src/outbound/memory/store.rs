//! In-memory week, entry and user storage.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use super::{POISONED, SimulatedLatency};
use crate::domain::ports::{
    DemoDataRepository, DemoDataRepositoryError, RemovedEntry, SeedingResult,
    TimesheetRepository, TimesheetRepositoryError, UserCredentials, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    DemoDataset, EmailAddress, EntryId, TimesheetEntry, TimesheetStatus, TimesheetWeek,
    TotalHours, User, UserId, WeekId, derive_status,
};

#[derive(Debug, Default)]
struct State {
    users: Vec<UserCredentials>,
    weeks: Vec<TimesheetWeek>,
    entries: Vec<TimesheetEntry>,
}

impl State {
    /// Re-derive and store the status of `id`; `None` when the week is unknown.
    fn restate_week(&mut self, id: &WeekId) -> Option<TimesheetStatus> {
        let total: TotalHours = self
            .entries
            .iter()
            .filter(|entry| entry.week_id() == id)
            .map(TimesheetEntry::hours)
            .sum();
        let status = derive_status(total);
        let slot = self.weeks.iter_mut().find(|week| week.id() == id)?;
        if slot.status() != status {
            *slot = slot.clone().with_status(status);
            debug!(week_id = %id, %status, %total, "stored week status");
        }
        Some(status)
    }
}

/// Week, entry and user storage held in process memory.
///
/// Weeks and entries keep insertion order. Each call takes the lock once, so
/// an entry write and the status it implies for its week land together.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    latency: SimulatedLatency,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, &'static str> {
        self.state.read().map_err(|_| POISONED)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, &'static str> {
        self.state.write().map_err(|_| POISONED)
    }
}

#[async_trait]
impl TimesheetRepository for InMemoryStore {
    async fn list_weeks(&self) -> Result<Vec<TimesheetWeek>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let state = self.read().map_err(TimesheetRepositoryError::query)?;
        Ok(state.weeks.clone())
    }

    async fn find_week(
        &self,
        id: &WeekId,
    ) -> Result<Option<TimesheetWeek>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let state = self.read().map_err(TimesheetRepositoryError::query)?;
        Ok(state.weeks.iter().find(|week| week.id() == id).cloned())
    }

    async fn refresh_week_status(
        &self,
        id: &WeekId,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let mut state = self.write().map_err(TimesheetRepositoryError::query)?;
        Ok(state.restate_week(id))
    }

    async fn list_entries(
        &self,
        week_id: &WeekId,
    ) -> Result<Vec<TimesheetEntry>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let state = self.read().map_err(TimesheetRepositoryError::query)?;
        Ok(state
            .entries
            .iter()
            .filter(|entry| entry.week_id() == week_id)
            .cloned()
            .collect())
    }

    async fn find_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<TimesheetEntry>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let state = self.read().map_err(TimesheetRepositoryError::query)?;
        Ok(state.entries.iter().find(|entry| entry.id() == *id).cloned())
    }

    async fn insert_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let mut state = self.write().map_err(TimesheetRepositoryError::query)?;
        if !state.weeks.iter().any(|week| week.id() == entry.week_id()) {
            return Ok(None);
        }
        if state.entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(TimesheetRepositoryError::query(format!(
                "entry {} already exists",
                entry.id()
            )));
        }
        state.entries.push(entry.clone());
        Ok(state.restate_week(entry.week_id()))
    }

    async fn update_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let mut state = self.write().map_err(TimesheetRepositoryError::query)?;
        let Some(slot) = state
            .entries
            .iter_mut()
            .find(|existing| existing.id() == entry.id())
        else {
            return Ok(None);
        };
        let previous_week = slot.week_id().clone();
        *slot = entry.clone();
        if previous_week != *entry.week_id() {
            state.restate_week(&previous_week);
        }
        Ok(state.restate_week(entry.week_id()))
    }

    async fn delete_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<RemovedEntry>, TimesheetRepositoryError> {
        self.latency.wait().await;
        let mut state = self.write().map_err(TimesheetRepositoryError::query)?;
        let Some(index) = state.entries.iter().position(|entry| entry.id() == *id) else {
            return Ok(None);
        };
        let entry = state.entries.remove(index);
        let status = state
            .restate_week(entry.week_id())
            .unwrap_or(TimesheetStatus::Missing);
        Ok(Some(RemovedEntry { entry, status }))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.latency.wait().await;
        let state = self.read().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .map(|credentials| &credentials.user)
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        self.latency.wait().await;
        let state = self.read().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|credentials| credentials.user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl DemoDataRepository for InMemoryStore {
    async fn seed_demo_data(
        &self,
        dataset: &DemoDataset,
    ) -> Result<SeedingResult, DemoDataRepositoryError> {
        let mut state = self.write().map_err(DemoDataRepositoryError::query)?;
        if !state.weeks.is_empty() || !state.users.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }
        state.users = dataset.users.clone();
        state.weeks = dataset.weeks.clone();
        state.entries = dataset.entries.clone();
        Ok(SeedingResult::Applied)
    }
}
