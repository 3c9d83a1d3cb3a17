//! PostgreSQL-backed `TimesheetRepository`.
//!
//! Entry writes run in one transaction with the status recompute of their
//! week. The week row is locked first, so concurrent writers to one week
//! queue behind each other and the last to commit stores the final status.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RemovedEntry, TimesheetRepository, TimesheetRepositoryError};
use crate::domain::{
    EntryId, TimesheetEntry, TimesheetStatus, TimesheetWeek, TotalHours, WeekId, derive_status,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_invalid_row, map_pool_error};
use super::models::{EntryChangeset, EntryRow, NewEntryRow, WeekRow};
use super::pool::{DbPool, PoolError};
use super::schema::{timesheet_entries, timesheet_weeks};

/// Diesel adapter for weeks and entries.
#[derive(Clone)]
pub struct DieselTimesheetRepository {
    pool: DbPool,
}

impl DieselTimesheetRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TimesheetRepositoryError {
    map_pool_error(error, TimesheetRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TimesheetRepositoryError {
    map_diesel_error(
        error,
        TimesheetRepositoryError::query,
        TimesheetRepositoryError::connection,
    )
}

fn to_week(row: WeekRow) -> Result<TimesheetWeek, TimesheetRepositoryError> {
    TimesheetWeek::try_from(row).map_err(|err| map_invalid_row(err, TimesheetRepositoryError::query))
}

fn to_entry(row: EntryRow) -> Result<TimesheetEntry, TimesheetRepositoryError> {
    TimesheetEntry::try_from(row)
        .map_err(|err| map_invalid_row(err, TimesheetRepositoryError::query))
}

/// Lock the week row for the rest of the transaction; `false` when unknown.
async fn lock_week(conn: &mut AsyncPgConnection, week_id: &str) -> QueryResult<bool> {
    let locked: Option<String> = timesheet_weeks::table
        .find(week_id)
        .select(timesheet_weeks::id)
        .for_no_key_update()
        .first(conn)
        .await
        .optional()?;
    Ok(locked.is_some())
}

/// Sum the week's entries and store the status they imply.
async fn store_status(conn: &mut AsyncPgConnection, week_id: &str) -> QueryResult<TimesheetStatus> {
    let centis: Option<i64> = timesheet_entries::table
        .filter(timesheet_entries::week_id.eq(week_id))
        .select(diesel::dsl::sum(timesheet_entries::hours_centis))
        .first(conn)
        .await?;
    let total = TotalHours::from_centis(
        u32::try_from(centis.unwrap_or_default()).unwrap_or(u32::MAX),
    );
    let status = derive_status(total);
    diesel::update(timesheet_weeks::table.find(week_id))
        .set(timesheet_weeks::status.eq(status.as_str()))
        .execute(conn)
        .await?;
    debug!(week_id, %status, %total, "stored week status");
    Ok(status)
}

#[async_trait]
impl TimesheetRepository for DieselTimesheetRepository {
    async fn list_weeks(&self) -> Result<Vec<TimesheetWeek>, TimesheetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<WeekRow> = timesheet_weeks::table
            .order(timesheet_weeks::position.asc())
            .select(WeekRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_week).collect()
    }

    async fn find_week(
        &self,
        id: &WeekId,
    ) -> Result<Option<TimesheetWeek>, TimesheetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<WeekRow> = timesheet_weeks::table
            .find(id.as_ref())
            .select(WeekRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_week).transpose()
    }

    async fn refresh_week_status(
        &self,
        id: &WeekId,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction(|conn| {
            async move {
                if !lock_week(conn, id.as_ref()).await? {
                    return Ok(None);
                }
                store_status(conn, id.as_ref()).await.map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn list_entries(
        &self,
        week_id: &WeekId,
    ) -> Result<Vec<TimesheetEntry>, TimesheetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EntryRow> = timesheet_entries::table
            .filter(timesheet_entries::week_id.eq(week_id.as_ref()))
            .order(timesheet_entries::position.asc())
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_entry).collect()
    }

    async fn find_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<TimesheetEntry>, TimesheetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<EntryRow> = timesheet_entries::table
            .find(*id.as_uuid())
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_entry).transpose()
    }

    async fn insert_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        let row = NewEntryRow::from(entry);
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction(|conn| {
            async move {
                if !lock_week(conn, row.week_id).await? {
                    return Ok(None);
                }
                diesel::insert_into(timesheet_entries::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                store_status(conn, row.week_id).await.map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn update_entry(
        &self,
        entry: &TimesheetEntry,
    ) -> Result<Option<TimesheetStatus>, TimesheetRepositoryError> {
        let changes = EntryChangeset::from(entry);
        let id = *entry.id().as_uuid();
        let week_id = entry.week_id().as_ref();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        conn.transaction(|conn| {
            async move {
                if !lock_week(conn, week_id).await? {
                    return Ok(None);
                }
                let updated = diesel::update(
                    timesheet_entries::table
                        .find(id)
                        .filter(timesheet_entries::week_id.eq(week_id)),
                )
                .set(&changes)
                .execute(conn)
                .await?;
                if updated == 0 {
                    return Ok(None);
                }
                store_status(conn, week_id).await.map(Some)
            }
            .scope_boxed()
        })
        .await
        .map_err(diesel_error)
    }

    async fn delete_entry(
        &self,
        id: &EntryId,
    ) -> Result<Option<RemovedEntry>, TimesheetRepositoryError> {
        let uuid = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = conn
            .transaction(|conn| {
                async move {
                    let owner: Option<String> = timesheet_entries::table
                        .find(uuid)
                        .select(timesheet_entries::week_id)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(week_id) = owner else {
                        return Ok(None);
                    };
                    lock_week(conn, &week_id).await?;
                    let deleted: Option<EntryRow> =
                        diesel::delete(timesheet_entries::table.find(uuid))
                            .returning(EntryRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                    let Some(row) = deleted else {
                        return Ok(None);
                    };
                    let status = store_status(conn, &week_id).await?;
                    Ok(Some((row, status)))
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;
        removed
            .map(|(row, status)| Ok(RemovedEntry { entry: to_entry(row)?, status }))
            .transpose()
    }
}
